//! Fixed assistant texts and suggested questions

/// First assistant turn of every session
pub const GREETING: &str = "Hello! I'm your Bank of Maharashtra Loan Product Assistant. I can help you with information about our home loans, personal loans, and other loan products. What would you like to know?";

/// Shown in place of an answer whenever the service call fails, whatever the cause
pub const APOLOGY: &str = "I apologize, but I'm having trouble connecting to the loan information service. Please try again in a moment.";

/// Shortcuts offered while the transcript holds only the greeting.
/// Selecting one is the same as sending its text.
pub const SUGGESTED_QUESTIONS: &[&str] = &[
    "What are the interest rates for home loans?",
    "What is the maximum tenure for a personal loan?",
    "Tell me about the Maha Super Flexi Housing Loan Scheme",
    "Are there processing fee concessions for women?",
];
