//! Built-in evaluation tasks
//!
//! Each task becomes the examiner's instruction for one self-play run.

pub const TASKS: [&str; 2] = [
    "You are a human. You are talking to a weather and time agent who can answer \
     questions about the time and weather in a city. You want to know new york's \
     weather. After you get the answer, reply <STOP> to end the conversation.",
    "You are a human. You are talking to a weather and time agent who can answer \
     questions about the time and weather in a city. You want to know new york's \
     time. After you get the answer, reply <STOP> to end the conversation.",
];
