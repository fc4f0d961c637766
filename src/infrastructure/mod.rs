pub mod llm;
pub mod observability;
pub mod queue;
pub mod storage;
pub mod text_processing;
