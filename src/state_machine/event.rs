//! Events that drive the self-play protocol

/// A responder finished a turn
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    ExaminerReplied { text: String },
    SubjectReplied { text: String },
}
