//! Configuration for the request performer.

/// Default scratch buffer capacity in bytes. Large enough for any reply a
/// link-local responder should send over UDP.
pub(crate) const DEFAULT_CAPACITY: usize = 2048;

/// Configuration for a [`RequestPerformer`](crate::RequestPerformer).
///
/// # Example
///
/// ```rust
/// use mdns::MdnsConfig;
///
/// let config = MdnsConfig::default()
///     .with_capacity(4096)
///     .with_strict_compression(true);
/// assert_eq!(config.capacity, 4096);
/// ```
#[derive(Debug, Clone)]
pub struct MdnsConfig {
    /// Capacity of the scratch buffer receives are read into. Datagrams
    /// longer than this are truncated by the kernel and will usually fail
    /// validation.
    pub capacity: usize,

    /// When set, a compression pointer is only accepted if its target
    /// precedes the position it was read from, the one form RFC 1035
    /// allows. Off by default: plenty of responders in the wild emit
    /// pointer arrangements a strict reading would reject.
    pub strict_compression: bool,
}

impl Default for MdnsConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl MdnsConfig {
    pub fn new() -> Self {
        MdnsConfig {
            capacity: DEFAULT_CAPACITY,
            strict_compression: false,
        }
    }

    /// Sets the scratch buffer capacity.
    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    /// Enables or disables strict compression-pointer checking.
    pub fn with_strict_compression(mut self, strict: bool) -> Self {
        self.strict_compression = strict;
        self
    }
}
