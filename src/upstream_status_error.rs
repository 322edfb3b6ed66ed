#[derive(Debug)]
pub struct UpstreamStatusError {
    pub url: String,
    pub status: u16,
}

impl std::fmt::Display for UpstreamStatusError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "upstream returned HTTP {} for {}", self.status, self.url)
    }
}

impl std::error::Error for UpstreamStatusError {}
