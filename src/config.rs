//! Runtime configuration: cluster endpoints, wallet keypair, and mint addresses

use std::{fmt, path::PathBuf, str::FromStr};

use solana_sdk::{
    pubkey::Pubkey,
    signature::{read_keypair_file, Keypair},
};

use crate::{
    error::{LiqzError, LiqzResult},
    types::{MintSet, TokenKind},
};

/// Solana cluster the client talks to
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Cluster {
    #[default]
    Devnet,
    Testnet,
    Mainnet,
    Localnet,
    /// Explicit RPC and websocket endpoints
    Custom { url: String, ws_url: String },
}

impl Cluster {
    pub fn url(&self) -> &str {
        match self {
            Cluster::Devnet => "https://api.devnet.solana.com",
            Cluster::Testnet => "https://api.testnet.solana.com",
            Cluster::Mainnet => "https://api.mainnet-beta.solana.com",
            Cluster::Localnet => "http://127.0.0.1:8899",
            Cluster::Custom { url, .. } => url,
        }
    }

    pub fn ws_url(&self) -> &str {
        match self {
            Cluster::Devnet => "wss://api.devnet.solana.com",
            Cluster::Testnet => "wss://api.testnet.solana.com",
            Cluster::Mainnet => "wss://api.mainnet-beta.solana.com",
            Cluster::Localnet => "ws://127.0.0.1:8900",
            Cluster::Custom { ws_url, .. } => ws_url,
        }
    }
}

/// Websocket endpoint matching an HTTP RPC endpoint
fn ws_from_http(url: &str) -> Option<String> {
    if let Some(rest) = url.strip_prefix("https://") {
        Some(format!("wss://{rest}"))
    } else {
        url.strip_prefix("http://").map(|rest| format!("ws://{rest}"))
    }
}

impl FromStr for Cluster {
    type Err = LiqzError;

    /// Accepts a moniker (`devnet`, `testnet`, `mainnet`, `localnet`, or their
    /// first letter) or `rpc_url[,ws_url]`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "d" | "devnet" => return Ok(Cluster::Devnet),
            "t" | "testnet" => return Ok(Cluster::Testnet),
            "m" | "mainnet" | "mainnet-beta" => return Ok(Cluster::Mainnet),
            "l" | "localnet" | "localhost" => return Ok(Cluster::Localnet),
            _ => {}
        }

        let mut parts = s.trim().splitn(2, ',');
        let url = parts.next().unwrap_or_default().trim().to_string();
        let ws_url = match parts.next() {
            Some(ws) => ws.trim().to_string(),
            None => ws_from_http(&url).ok_or_else(|| LiqzError::InvalidCluster(s.to_string()))?,
        };
        let ws_ok = ws_url.starts_with("ws://") || ws_url.starts_with("wss://");
        if ws_from_http(&url).is_none() || !ws_ok {
            return Err(LiqzError::InvalidCluster(s.to_string()));
        }
        Ok(Cluster::Custom { url, ws_url })
    }
}

impl fmt::Display for Cluster {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cluster::Devnet => f.write_str("devnet"),
            Cluster::Testnet => f.write_str("testnet"),
            Cluster::Mainnet => f.write_str("mainnet"),
            Cluster::Localnet => f.write_str("localnet"),
            Cluster::Custom { url, ws_url } => write!(f, "{url},{ws_url}"),
        }
    }
}

/// `clap` value parser for [`Cluster`]
pub fn parse_cluster(s: &str) -> Result<Cluster, String> {
    s.parse().map_err(|e: LiqzError| e.to_string())
}

fn parse_pubkey(name: &str, value: &str) -> LiqzResult<Pubkey> {
    value.trim().parse().map_err(|_| LiqzError::InvalidPubkey {
        name: name.to_string(),
        value: value.to_string(),
    })
}

impl MintSet {
    /// Read the three mints from the process environment
    pub fn from_env() -> LiqzResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read the three mints through `lookup`, failing on the first missing or
    /// malformed value
    pub fn from_lookup<F>(lookup: F) -> LiqzResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |kind: TokenKind| -> LiqzResult<Pubkey> {
            let var = kind.env_var();
            let value = lookup(var).ok_or(LiqzError::MissingEnv(var))?;
            parse_pubkey(var, &value)
        };
        MintSet::new(
            read(TokenKind::Liz)?,
            read(TokenKind::Tai)?,
            read(TokenKind::Dai)?,
        )
    }
}

/// Mints whose variables are set, in account order
///
/// Unset variables are skipped. Malformed values and a mint shared between two
/// kinds are still errors.
pub fn available_mints<F>(lookup: F) -> LiqzResult<Vec<(TokenKind, Pubkey)>>
where
    F: Fn(&str) -> Option<String>,
{
    let mints = match MintSet::from_lookup(&lookup) {
        Ok(mints) => return Ok(mints.iter().map(|(kind, mint)| (kind, *mint)).collect()),
        Err(LiqzError::MissingEnv(_)) => TokenKind::ALL
            .into_iter()
            .filter_map(|kind| {
                let var = kind.env_var();
                lookup(var).map(|value| parse_pubkey(var, &value).map(|mint| (kind, mint)))
            })
            .collect::<LiqzResult<Vec<_>>>()?,
        Err(err) => return Err(err),
    };

    for (i, (first, mint)) in mints.iter().enumerate() {
        if let Some((second, _)) = mints[i + 1..].iter().find(|(_, other)| other == mint) {
            return Err(LiqzError::DuplicateMint {
                mint: mint.to_string(),
                first: first.name(),
                second: second.name(),
            });
        }
    }
    Ok(mints)
}

/// `~/.config/solana/id.json`, the Solana CLI's default wallet
pub fn default_keypair_path() -> PathBuf {
    let home = std::env::var_os("HOME").unwrap_or_else(|| ".".into());
    PathBuf::from(home).join(".config/solana/id.json")
}

/// Load a wallet keypair from a Solana CLI JSON file
pub fn load_keypair(path: &std::path::Path) -> LiqzResult<Keypair> {
    read_keypair_file(path).map_err(|e| LiqzError::Keypair {
        path: path.display().to_string(),
        reason: e.to_string(),
    })
}
