/// Vision agent document analysis client.
pub mod vision;
