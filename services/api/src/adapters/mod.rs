pub mod blob;
pub mod kv;
pub mod outcomes_llm;
pub mod thumbnail_llm;

pub use blob::BlobAdapter;
pub use kv::KvAdapter;
pub use outcomes_llm::OpenAiOutcomeAdapter;
pub use thumbnail_llm::GeminiThumbnailAdapter;
