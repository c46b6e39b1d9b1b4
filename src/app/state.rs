use crate::{
    app::{document::store::FsDocumentStore, parser::vision::VisionParser},
    core::{
        export::{FontConfig, PdfExporter},
        service::document::DocumentService,
    },
};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[derive(Clone)]
pub struct AppState {
    /// Document upload, parse and export operations.
    pub documents: DocumentService<FsDocumentStore>,
}

impl AppState {
    /// Load the application state using the provided configuration.
    /// Panics when the API key is missing or the export fonts cannot
    /// be loaded.
    pub fn new(args: &crate::config::StartArgs) -> Self {
        tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from(args.log()))
            .init();

        let store = FsDocumentStore::new(&args.upload_path());
        let parser = Arc::new(VisionParser::new(args.parser_url(), &args.api_key()));

        let exporter = PdfExporter::new(FontConfig::Embedded {
            regular: args.font_path().into(),
            bold: args.bold_font_path().into(),
        })
        .expect("unable to load export fonts");

        let documents = DocumentService::new(store, parser, Arc::new(exporter));

        Self { documents }
    }
}
