//! X12 837I institutional claim document encoder.
//!
//! Turns batches of validated claims into segment-delimited EDI documents:
//! ISA/GS/ST envelope, submitter and receiver loops, per-claim hierarchical
//! loops with service lines, and self-consistent SE/GE/IEA trailers.

pub mod batch;
pub mod control;
pub mod dates;
pub mod error;
pub mod segment;
pub mod writer;

pub use batch::batch_claims;
pub use control::{
    ControlNumberSource, ControlNumbers, RandomControlNumbers, SequentialControlNumbers,
};
pub use dates::compact_date;
pub use error::{EdiError, Result};
pub use segment::{ELEMENT_SEPARATOR, SEGMENT_TERMINATOR, SUB_ELEMENT_SEPARATOR, Segment, SegmentBuffer};
pub use writer::{Edi837Document, Edi837Writer, GS_VERSION, ISA_CONTROL_VERSION, write_documents};
