//! Request translation.
//!
//! # Responsibilities
//! - Pick the script or document map for a request
//! - Pick the name or IP to interpolate
//! - Run the mapper, then the fallback search
//! - Derive the document root when asked to
//!
//! # Design Decisions
//! - Built once from a validated config; immutable afterwards
//! - Explicit `Decline` rather than a silent default, so the host can fall
//!   through to its ordinary handling

use std::fmt;

use thiserror::Error;

use crate::config::loader::ConfigError;
use crate::config::schema::{LookupMode, MapConfig, VhostConfig};
use crate::config::validation::{compile_map, validate_config};
use crate::fallback::probe::ExistenceProbe;
use crate::fallback::resolver::{FallbackOutcome, FallbackResolver};
use crate::mapping::format::MapFormat;
use crate::mapping::mapper::{PathMapper, ResolvedPath};
use crate::observability::metrics;
use crate::routing::matcher::{mentions_script_dir, ScriptAliasMatcher};

/// What the host knows about the request.
#[derive(Debug, Clone, Default)]
pub struct RequestContext {
    /// Requested server name.
    pub hostname: Option<String>,
    /// Request path, normally starting with `/`.
    pub uri: String,
    /// Port the connection arrived on.
    pub local_port: u16,
    /// Address the connection arrived on.
    pub local_ip: Option<String>,
}

impl RequestContext {
    pub fn new(hostname: impl Into<String>, uri: impl Into<String>) -> Self {
        Self {
            hostname: Some(hostname.into()),
            uri: uri.into(),
            local_port: 80,
            local_ip: None,
        }
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.local_port = port;
        self
    }

    pub fn with_local_ip(mut self, ip: impl Into<String>) -> Self {
        self.local_ip = Some(ip.into());
        self
    }
}

/// Reasons the translator takes no action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Decline {
    #[error("request URI is not an absolute path")]
    UriNotAbsolute,

    #[error("no map configured for this request")]
    Disabled,

    #[error("request has no hostname or local address to map")]
    MissingHost,
}

impl Decline {
    pub fn as_str(&self) -> &'static str {
        match self {
            Decline::UriNotAbsolute => "uri_not_absolute",
            Decline::Disabled => "disabled",
            Decline::MissingHost => "missing_host",
        }
    }
}

/// Handler the host should use for the translated path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Handler {
    CgiScript,
}

impl fmt::Display for Handler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Handler::CgiScript => f.write_str("cgi-script"),
        }
    }
}

/// The outcome of translating one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Translation {
    pub filename: ResolvedPath,
    pub handler: Option<Handler>,
    pub document_root: Option<Vec<u8>>,
    pub fallback: FallbackOutcome,
}

/// A compiled map and what it interpolates.
#[derive(Debug, Clone)]
struct CompiledMap {
    format: MapFormat,
    lookup: LookupMode,
}

impl CompiledMap {
    fn compile(field: &'static str, config: &MapConfig) -> Result<Option<Self>, ConfigError> {
        let format = compile_map(field, config).map_err(|e| ConfigError::Validation(vec![e]))?;
        Ok(format.map(|format| Self {
            format,
            lookup: config.lookup,
        }))
    }
}

/// Translates requests into filesystem paths.
#[derive(Debug, Clone)]
pub struct Translator {
    document_root: Option<CompiledMap>,
    script_alias: Option<CompiledMap>,
    set_document_root: bool,
    mapper: PathMapper,
    fallback: Option<FallbackResolver>,
    scripts: ScriptAliasMatcher,
}

impl Translator {
    /// Validate `config` and decode its formats.
    pub fn from_config(config: &VhostConfig) -> Result<Self, ConfigError> {
        validate_config(config).map_err(ConfigError::Validation)?;

        let fallback = config.fallback.enabled.then(|| {
            FallbackResolver::new(config.fallback.prefix.clone(), config.fallback.max_hostname_len)
        });

        let translator = Self {
            document_root: CompiledMap::compile("document_root.map", &config.document_root)?,
            script_alias: CompiledMap::compile("script_alias.map", &config.script_alias)?,
            set_document_root: config.set_document_root,
            mapper: PathMapper::new(config.builder.window_capacity),
            fallback,
            scripts: ScriptAliasMatcher,
        };

        tracing::info!(
            document_root = translator.document_root.as_ref().map(|m| m.format.as_str()).unwrap_or("none"),
            script_alias = translator.script_alias.as_ref().map(|m| m.format.as_str()).unwrap_or("none"),
            fallback = translator.fallback.is_some(),
            "Translator ready"
        );

        Ok(translator)
    }

    /// Translate a request.
    pub fn translate(
        &self,
        req: &RequestContext,
        probe: &dyn ExistenceProbe,
    ) -> Result<Translation, Decline> {
        let result = self.translate_inner(req, probe);
        match &result {
            Ok(t) => {
                let handler = match t.handler {
                    Some(Handler::CgiScript) => "cgi-script",
                    None => "static",
                };
                metrics::record_translation(handler);
                tracing::debug!(
                    uri = %req.uri,
                    filename = %t.filename,
                    handler,
                    fallback = %t.fallback,
                    "Request translated"
                );
            }
            Err(decline) => {
                metrics::record_decline(decline.as_str());
                tracing::debug!(uri = %req.uri, reason = %decline, "Request declined");
            }
        }
        result
    }

    fn translate_inner(
        &self,
        req: &RequestContext,
        probe: &dyn ExistenceProbe,
    ) -> Result<Translation, Decline> {
        let script_uri = self
            .script_alias
            .as_ref()
            .and_then(|map| self.scripts.match_uri(&req.uri).map(|uri| (map, uri)));

        let (map, uri, handler) = match script_uri {
            Some((map, uri)) => (Some(map), uri, Some(Handler::CgiScript)),
            None if req.uri.starts_with('/') => (self.document_root.as_ref(), req.uri.as_str(), None),
            None => return Err(Decline::UriNotAbsolute),
        };
        let map = map.ok_or(Decline::Disabled)?;

        let name = match map.lookup {
            LookupMode::Name => req.hostname.as_deref(),
            LookupMode::Ip => req.local_ip.as_deref(),
        }
        .filter(|name| !name.is_empty())
        .ok_or(Decline::MissingHost)?;

        let candidate = self.mapper.resolve(name, uri, req.local_port, &map.format);
        let (filename, fallback) = match &self.fallback {
            Some(resolver) => resolver.resolve(candidate, probe),
            None => (candidate, FallbackOutcome::Disabled),
        };

        let document_root = (self.set_document_root && !mentions_script_dir(&req.uri))
            .then(|| PathMapper::document_root(&filename));

        Ok(Translation {
            filename,
            handler,
            document_root,
            fallback,
        })
    }
}
