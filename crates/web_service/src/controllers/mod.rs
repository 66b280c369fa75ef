pub mod message_recap; // POST /json/ai/message_recap
pub mod system_controller;
pub mod topic_title; // POST /json/ai/suggest_topic_title
