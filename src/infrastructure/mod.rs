pub mod fs_image_source;
pub mod in_memory_document_store;
pub mod json_session_store;
