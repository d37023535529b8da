mod submit;

pub use submit::{ReviewCommand, ReviewPayload, submit_review, submit_review_endpoint};
