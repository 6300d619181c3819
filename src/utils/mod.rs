//! Cross-cutting helpers, currently the optional parallel iteration layer.

pub mod parallel;
