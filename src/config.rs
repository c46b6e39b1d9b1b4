use clap::Parser;

/// The default address to listen on.
const DEFAULT_ADDRESS: &str = "0.0.0.0:42069";
/// The default upload path for the `fs` document storage.
const DEFAULT_UPLOAD_PATH: &str = "upload";
/// The default base URL of the document analysis API.
const DEFAULT_PARSER_URL: &str = "https://api.va.landing.ai";
/// The default font used when re-rendering chunks. Must be fixed width and
/// cover the unicode range of extracted text.
const DEFAULT_FONT_PATH: &str = "fonts/DejaVuSansMono.ttf";
/// The default bold variant of the render font, used for headings and
/// table headers.
const DEFAULT_BOLD_FONT_PATH: &str = "fonts/DejaVuSansMono-Bold.ttf";

#[derive(Debug, Parser)]
#[command(name = "chunkview", version = "0.1", about = "Parse PDFs into chunks and re-render them", long_about = None)]
pub struct StartArgs {
    /// RUST_LOG string to use as the env filter.
    #[arg(short, long)]
    log: Option<String>,

    /// Address to listen on.
    #[arg(short, long)]
    address: Option<String>,

    /// Where the `FsDocumentStore` keeps uploaded documents.
    #[arg(short, long)]
    upload_path: Option<String>,

    /// Base URL of the document analysis API.
    #[arg(short, long)]
    parser_url: Option<String>,

    /// API key for the document analysis API.
    #[arg(short = 'k', long)]
    api_key: Option<String>,

    /// Path to the font embedded in exported documents.
    #[arg(long)]
    font_path: Option<String>,

    /// Path to the bold variant of the export font.
    #[arg(long)]
    bold_font_path: Option<String>,

    /// CORS allowed origins.
    #[arg(long)]
    cors_allowed_origins: Option<String>,

    /// CORS allowed headers.
    #[arg(long)]
    cors_allowed_headers: Option<String>,
}

/// Implement a getter method on [StartArgs], using the `$var` environment variable as a fallback
/// and either panic or default if neither the argument nor the environment variable is set.
macro_rules! arg {
    ($id:ident, $var:literal, panic $msg:literal) => {
        impl StartArgs {
            pub fn $id(&self) -> String {
                match &self.$id {
                    Some(val) => val.to_string(),
                    None => match std::env::var($var) {
                        Ok(val) => val,
                        Err(_) => panic!($msg),
                    },
                }
            }
        }
    };
    ($id:ident, $var:literal, default $value:expr) => {
        impl StartArgs {
            pub fn $id(&self) -> String {
                match &self.$id {
                    Some(val) => val.to_string(),
                    None => match std::env::var($var) {
                        Ok(val) => val,
                        Err(_) => $value,
                    },
                }
            }
        }
    };
}

impl StartArgs {
    pub fn allowed_origins(&self) -> Vec<String> {
        match &self.cors_allowed_origins {
            Some(origins) => origins
                .split(',')
                .filter_map(|o| (!o.is_empty()).then_some(String::from(o)))
                .collect(),
            None => match std::env::var("CORS_ALLOWED_ORIGINS") {
                Ok(origins) => origins
                    .split(',')
                    .filter_map(|o| (!o.is_empty()).then_some(String::from(o)))
                    .collect(),
                // The bundled UI is same origin, an empty list is fine.
                Err(_) => vec![],
            },
        }
    }

    pub fn allowed_headers(&self) -> Vec<String> {
        match &self.cors_allowed_headers {
            Some(headers) => headers
                .split(',')
                .filter_map(|h| (!h.is_empty()).then_some(String::from(h)))
                .collect(),
            None => match std::env::var("CORS_ALLOWED_HEADERS") {
                Ok(headers) => headers
                    .split(',')
                    .filter_map(|h| (!h.is_empty()).then_some(String::from(h)))
                    .collect(),
                // An empty list allows any header.
                Err(_) => vec![],
            },
        }
    }
}

arg!(log,            "RUST_LOG",             default "info".to_string());
arg!(address,        "ADDRESS",              default DEFAULT_ADDRESS.to_string());
arg!(upload_path,    "UPLOAD_PATH",          default DEFAULT_UPLOAD_PATH.to_string());
arg!(parser_url,     "VISION_AGENT_URL",     default DEFAULT_PARSER_URL.to_string());
arg!(api_key,        "VISION_AGENT_API_KEY", panic   "Api key not found; Pass --api-key or set VISION_AGENT_API_KEY");
arg!(font_path,      "FONT_PATH",            default DEFAULT_FONT_PATH.to_string());
arg!(bold_font_path, "BOLD_FONT_PATH",       default DEFAULT_BOLD_FONT_PATH.to_string());

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cors_lists_parse_from_args() {
        let args = StartArgs::parse_from([
            "chunkview",
            "--cors-allowed-origins",
            "http://localhost:3000,http://localhost:5173",
            "--cors-allowed-headers",
            "content-type,,authorization",
        ]);

        assert_eq!(
            vec!["http://localhost:3000", "http://localhost:5173"],
            args.allowed_origins()
        );
        assert_eq!(vec!["content-type", "authorization"], args.allowed_headers());
    }
}
