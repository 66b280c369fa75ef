pub mod html_sanitizer;
pub mod llm_utils;
pub mod message_lookup;
pub mod recap_service;
pub mod topic_gate;
pub mod topic_title_service;

pub use recap_service::generate_message_recap;
pub use topic_title_service::suggest_topic_title;
