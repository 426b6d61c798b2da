//! Test utilities for twain_models tests.

pub mod mock_driver;

#[allow(unused_imports)]
pub use mock_driver::{MockChatDriver, MockReply};

/// A well-formed five-line model reply.
#[allow(dead_code)]
pub fn five_questions() -> String {
    [
        "What made you feel closest to me this week?",
        "Which small habit of mine do you secretly love?",
        "Where would you take me on a surprise weekend?",
        "What is one dream you have not told me yet?",
        "How can I support you better when you're stressed?",
    ]
    .join("\n")
}
