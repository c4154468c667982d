// Core operation exports
pub mod guide;
pub mod invoker;
pub mod matcher;
pub mod prompts;
pub mod validation;

pub use guide::{Guide, FALLBACK_RESPONSE};
pub use invoker::invoke_structured;
pub use matcher::{MatchError, Matcher};
pub use prompts::{guidance_output_schema, match_output_schema, render_guidance_prompt, render_match_prompt};
pub use validation::{FromRawInput, RawInput, ValidationError};
