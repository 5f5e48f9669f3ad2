//! Server configuration from environment variables.

use crate::error::ConfigError;
use std::net::SocketAddr;

pub const DEFAULT_BIND_ADDR: ([u8; 4], u16) = ([127, 0, 0, 1], 3000);
pub const DEFAULT_API_PREFIX: &str = "/api/v1";
/// 1 MiB.
pub const DEFAULT_BODY_LIMIT_BYTES: usize = 1024 * 1024;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
    /// Mount point of the resource routes, e.g. "/api/v1". Empty mounts at the root.
    pub api_prefix: String,
    pub body_limit_bytes: usize,
}

impl ServerConfig {
    /// Read `BIND_ADDR`, `API_PREFIX` and `BODY_LIMIT_BYTES`, falling back to defaults when unset.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let bind_addr = match lookup("BIND_ADDR") {
            Some(v) => v
                .parse()
                .map_err(|_| ConfigError::Invalid { key: "BIND_ADDR", value: v })?,
            None => SocketAddr::from(DEFAULT_BIND_ADDR),
        };
        let api_prefix = match lookup("API_PREFIX") {
            Some(v) => normalize_prefix(&v)
                .ok_or(ConfigError::Invalid { key: "API_PREFIX", value: v })?,
            None => DEFAULT_API_PREFIX.to_string(),
        };
        let body_limit_bytes = match lookup("BODY_LIMIT_BYTES") {
            Some(v) => v
                .parse()
                .map_err(|_| ConfigError::Invalid { key: "BODY_LIMIT_BYTES", value: v })?,
            None => DEFAULT_BODY_LIMIT_BYTES,
        };
        Ok(Self {
            bind_addr,
            api_prefix,
            body_limit_bytes,
        })
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(DEFAULT_BIND_ADDR),
            api_prefix: DEFAULT_API_PREFIX.to_string(),
            body_limit_bytes: DEFAULT_BODY_LIMIT_BYTES,
        }
    }
}

/// "/api/v1/" -> "/api/v1", "api" -> "/api", "/" -> "". Whitespace inside is rejected.
fn normalize_prefix(raw: &str) -> Option<String> {
    let trimmed = raw.trim().trim_matches('/');
    if trimmed.chars().any(char::is_whitespace) {
        return None;
    }
    if trimmed.is_empty() {
        return Some(String::new());
    }
    Some(format!("/{}", trimmed))
}
