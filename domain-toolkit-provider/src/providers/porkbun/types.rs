//! Porkbun API 类型定义

use serde::{Deserialize, Deserializer, Serialize};

/// 所有请求体都携带的凭证字段
#[derive(Debug, Serialize)]
pub struct PorkbunAuth<'a, B: Serialize> {
    pub apikey: &'a str,
    pub secretapikey: &'a str,
    #[serde(flatten)]
    pub body: &'a B,
}

/// 无额外字段的请求体
#[derive(Debug, Serialize)]
pub struct EmptyBody {}

/// 通用响应外壳：`status` 为 `"SUCCESS"` 或 `"ERROR"`
#[derive(Debug, Deserialize)]
pub struct PorkbunEnvelope {
    pub status: String,
    #[serde(default)]
    pub message: Option<String>,
}

impl PorkbunEnvelope {
    pub fn is_success(&self) -> bool {
        self.status.eq_ignore_ascii_case("SUCCESS")
    }
}

/// `/ping` 响应
#[derive(Debug, Deserialize)]
pub struct PingPayload {
    #[serde(rename = "yourIp", default)]
    pub your_ip: Option<String>,
}

/// `/domain/listAll` 响应
#[derive(Debug, Deserialize)]
pub struct ListAllPayload {
    #[serde(default)]
    pub domains: Vec<PorkbunDomain>,
}

/// `/domain/listAll` 中的单个域名
#[derive(Debug, Deserialize)]
pub struct PorkbunDomain {
    pub domain: String,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub tld: Option<String>,
    #[serde(rename = "expireDate", alias = "expiry", default)]
    pub expire_date: Option<String>,
    #[serde(rename = "autoRenew", default, deserialize_with = "flag")]
    pub auto_renew: Option<bool>,
    #[serde(rename = "securityLock", default, deserialize_with = "flag")]
    pub security_lock: Option<bool>,
    #[serde(rename = "whoisPrivacy", default, deserialize_with = "flag")]
    pub whois_privacy: Option<bool>,
}

/// `/domain/getNs/{domain}` 响应
#[derive(Debug, Deserialize)]
pub struct GetNsPayload {
    #[serde(default)]
    pub ns: Option<Vec<String>>,
}

/// `/domain/updateNs/{domain}` 请求体
#[derive(Debug, Serialize)]
pub struct UpdateNsBody<'a> {
    pub ns: &'a [String],
}

/// `/domain/checkDomain/{domain}` 响应
#[derive(Debug, Deserialize)]
pub struct CheckDomainPayload {
    pub response: CheckDomainResponse,
}

#[derive(Debug, Deserialize)]
pub struct CheckDomainResponse {
    pub avail: String,
    #[serde(default, deserialize_with = "price")]
    pub price: Option<String>,
    #[serde(rename = "regularPrice", default, deserialize_with = "price")]
    pub regular_price: Option<String>,
    #[serde(default, deserialize_with = "flag")]
    pub premium: Option<bool>,
}

/// `/domain/create` 请求体
#[derive(Debug, Serialize)]
pub struct CreateDomainBody<'a> {
    pub domain: &'a str,
    /// 空对象：使用账户默认联系人
    #[serde(rename = "registrantContact")]
    pub registrant_contact: EmptyBody,
}

/// Porkbun 的布尔字段可能是 `"1"`/`"0"`、`1`/`0`、`"yes"`/`"no"` 或真正的布尔值
fn flag<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Flag {
        Bool(bool),
        Int(i64),
        Str(String),
    }

    Ok(match Option::<Flag>::deserialize(deserializer)? {
        Some(Flag::Bool(b)) => Some(b),
        Some(Flag::Int(i)) => Some(i != 0),
        Some(Flag::Str(s)) => match s.trim().to_ascii_lowercase().as_str() {
            "1" | "yes" | "true" | "on" => Some(true),
            "0" | "no" | "false" | "off" => Some(false),
            _ => None,
        },
        None => None,
    })
}

/// 价格可能是字符串或数字，统一为字符串
fn price<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Price {
        Str(String),
        Num(f64),
    }

    Ok(match Option::<Price>::deserialize(deserializer)? {
        Some(Price::Str(s)) => Some(s),
        Some(Price::Num(n)) => Some(format!("{n:.2}")),
        None => None,
    })
}
