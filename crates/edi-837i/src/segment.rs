//! EDI segment primitives.
//!
//! A segment is one terminator-delimited record; elements are joined by the
//! element separator and composite values by the sub-element separator. The
//! buffer keeps a running segment count so trailers can carry an exact
//! count without a post-pass over the finished text.

pub const SEGMENT_TERMINATOR: char = '~';
pub const ELEMENT_SEPARATOR: char = '*';
pub const SUB_ELEMENT_SEPARATOR: char = ':';

/// Builder for one segment.
#[derive(Debug, Clone)]
pub struct Segment {
    elements: Vec<String>,
}

impl Segment {
    pub fn new(id: &str) -> Self {
        Self {
            elements: vec![id.to_string()],
        }
    }

    pub fn element(mut self, value: impl Into<String>) -> Self {
        self.elements.push(value.into());
        self
    }

    /// Append `count` empty elements.
    pub fn blanks(mut self, count: usize) -> Self {
        for _ in 0..count {
            self.elements.push(String::new());
        }
        self
    }

    /// Append one element whose parts are joined by the sub-element
    /// separator (e.g. `HC:99284`).
    pub fn composite(mut self, parts: &[&str]) -> Self {
        self.elements
            .push(parts.join(&SUB_ELEMENT_SEPARATOR.to_string()));
        self
    }

    pub fn render(&self) -> String {
        let mut out = self.elements.join(&ELEMENT_SEPARATOR.to_string());
        out.push(SEGMENT_TERMINATOR);
        out
    }
}

/// Ordered segment collection for one document.
#[derive(Debug, Default)]
pub struct SegmentBuffer {
    segments: Vec<String>,
}

impl SegmentBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, segment: Segment) {
        self.segments.push(segment.render());
    }

    /// Number of segments written so far.
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Render the document: one segment per line, no trailing newline.
    pub fn finish(self) -> String {
        self.segments.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_elements_blanks_and_composites() {
        let segment = Segment::new("SV2")
            .element("0450")
            .composite(&["HC", "99284"])
            .element("1250.00")
            .element("UN")
            .element("1");
        assert_eq!(segment.render(), "SV2*0450*HC:99284*1250.00*UN*1~");

        let nm1 = Segment::new("NM1")
            .element("85")
            .element("2")
            .element("MERCY HOSPITAL")
            .blanks(4)
            .element("XX")
            .element("1234567890");
        assert_eq!(nm1.render(), "NM1*85*2*MERCY HOSPITAL*****XX*1234567890~");
    }

    #[test]
    fn buffer_counts_and_joins_with_newlines() {
        let mut buffer = SegmentBuffer::new();
        buffer.push(Segment::new("ST").element("837").element("0001"));
        buffer.push(Segment::new("SE").element("2").element("0001"));
        assert_eq!(buffer.len(), 2);
        assert_eq!(buffer.finish(), "ST*837*0001~\nSE*2*0001~");
    }
}
