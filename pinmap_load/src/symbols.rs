// Copyright 2025 the Pinmap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::future::Future;

use futures_util::future::try_join_all;
use hashbrown::HashMap;

/// Transport-level failure reported by an [`AssetSource`].
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum FetchError {
    /// Nothing exists at the URL.
    #[error("not found")]
    NotFound,
    /// The server answered with a non-success status.
    #[error("unexpected status {0}")]
    Status(u16),
    /// The request never completed.
    #[error("transport failed: {0}")]
    Transport(String),
}

/// A symbol in the batch failed to load; nothing from the batch was registered.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("failed to load asset `{kind}` from {url}")]
pub struct AssetLoadError {
    /// Asset kind whose fetch failed.
    pub kind: String,
    /// URL that failed.
    pub url: String,
    /// Underlying failure.
    #[source]
    pub source: FetchError,
}

/// Fetches raw asset bytes by URL.
///
/// The bytes are opaque to this crate; the host decides how to render them.
pub trait AssetSource {
    /// Fetches `url`.
    fn fetch(&self, url: &str) -> impl Future<Output = Result<Vec<u8>, FetchError>>;
}

/// A registered marker symbol.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Symbol {
    /// Asset kind; also the symbol id.
    pub kind: String,
    /// Source URL.
    pub url: String,
    /// Raw bytes as fetched.
    pub bytes: Vec<u8>,
}

impl Symbol {
    /// Fragment reference markers use to instance the symbol.
    pub fn href(&self) -> String {
        format!("#{}", self.kind)
    }
}

/// Symbols by asset kind.
#[derive(Clone, Debug, Default)]
pub struct SymbolRegistry {
    symbols: HashMap<String, Symbol>,
}

impl SymbolRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `symbol`, replacing any previous one of the same kind.
    pub fn register(&mut self, symbol: Symbol) {
        self.symbols.insert(symbol.kind.clone(), symbol);
    }

    /// Symbol for `kind`.
    pub fn get(&self, kind: &str) -> Option<&Symbol> {
        self.symbols.get(kind)
    }

    /// Returns `true` if `kind` is registered.
    pub fn contains(&self, kind: &str) -> bool {
        self.symbols.contains_key(kind)
    }

    /// Number of registered symbols.
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    /// Returns `true` if nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Registered kinds, sorted.
    pub fn kinds(&self) -> Vec<&str> {
        let mut kinds: Vec<_> = self.symbols.keys().map(String::as_str).collect();
        kinds.sort_unstable();
        kinds
    }
}

/// Fetches every `(kind, url)` concurrently and registers the results.
///
/// The batch fails as a whole on the first fetch error, which is also logged.
pub async fn load_symbols<S, I, K, U>(source: &S, sources: I) -> Result<SymbolRegistry, AssetLoadError>
where
    S: AssetSource,
    I: IntoIterator<Item = (K, U)>,
    K: Into<String>,
    U: Into<String>,
{
    let requests: Vec<(String, String)> = sources
        .into_iter()
        .map(|(kind, url)| (kind.into(), url.into()))
        .collect();

    let fetches = requests.into_iter().map(|(kind, url)| async move {
        match source.fetch(&url).await {
            Ok(bytes) => Ok(Symbol { kind, url, bytes }),
            Err(error) => {
                tracing::error!(%kind, %url, %error, "asset failed to load");
                Err(AssetLoadError {
                    kind,
                    url,
                    source: error,
                })
            }
        }
    });

    let symbols = try_join_all(fetches).await?;
    let mut registry = SymbolRegistry::new();
    for symbol in symbols {
        tracing::debug!(kind = %symbol.kind, bytes = symbol.bytes.len(), "symbol registered");
        registry.register(symbol);
    }
    Ok(registry)
}

#[cfg(test)]
mod tests {
    use core::cell::RefCell;

    use hashbrown::HashMap;

    use super::{AssetSource, FetchError, load_symbols};

    #[derive(Default)]
    struct MapSource {
        files: HashMap<&'static str, &'static [u8]>,
        requested: RefCell<Vec<String>>,
    }

    impl AssetSource for MapSource {
        async fn fetch(&self, url: &str) -> Result<Vec<u8>, FetchError> {
            self.requested.borrow_mut().push(url.to_owned());
            self.files
                .get(url)
                .map(|b| b.to_vec())
                .ok_or(FetchError::NotFound)
        }
    }

    fn source() -> MapSource {
        let mut s = MapSource::default();
        s.files.insert("pin.svg", b"<svg/>");
        s.files.insert("flag.svg", b"<svg id='f'/>");
        s
    }

    #[test]
    fn registers_every_symbol() {
        let s = source();
        let registry = pollster::block_on(load_symbols(
            &s,
            [("base", "pin.svg"), ("flag", "flag.svg")],
        ))
        .expect("all present");
        assert_eq!(registry.kinds(), vec!["base", "flag"]);
        let base = registry.get("base").expect("registered");
        assert_eq!(base.bytes, b"<svg/>");
        assert_eq!(base.href(), "#base");
        assert_eq!(s.requested.borrow().len(), 2);
    }

    #[test]
    fn one_failure_fails_the_batch() {
        let s = source();
        let err = pollster::block_on(load_symbols(
            &s,
            [("base", "pin.svg"), ("gone", "missing.svg")],
        ))
        .unwrap_err();
        assert_eq!(err.kind, "gone");
        assert_eq!(err.url, "missing.svg");
        assert_eq!(err.source, FetchError::NotFound);
    }

    #[test]
    fn empty_batch_is_ok() {
        let s = source();
        let registry =
            pollster::block_on(load_symbols(&s, Vec::<(String, String)>::new())).expect("empty");
        assert!(registry.is_empty());
    }
}
