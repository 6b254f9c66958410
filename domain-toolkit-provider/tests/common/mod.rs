//! 共享测试工具和辅助函数

#![allow(dead_code)]

use std::sync::Arc;

use domain_toolkit_provider::{
    DnsRecordProvider, RegistrarCredentials, RegistrarProvider, create_dns_provider,
    create_registrar,
};
use serde_json::{Value, json};
use wiremock::MockServer;

/// 断言 `Result` 为 `Ok`，并解包返回内部值（失败则直接让测试失败）。
#[macro_export]
macro_rules! require_ok {
    ($expr:expr $(,)?) => {{
        let res = $expr;
        assert!(res.is_ok(), "expected Ok(..), got {res:?}");
        let Ok(val) = res else {
            return;
        };
        val
    }};
}

pub const TEST_API_KEY: &str = "pk1_test_key_0001";
pub const TEST_SECRET_KEY: &str = "sk1_test_secret_0001";
pub const TEST_TOKEN: &str = "cf_test_token";
pub const TEST_ZONE: &str = "zone-abc123";

/// 指向 mock server 的注册商客户端
pub fn registrar_for(server: &MockServer) -> Arc<dyn RegistrarProvider> {
    create_registrar(
        RegistrarCredentials::new(TEST_API_KEY, TEST_SECRET_KEY),
        Some(&server.uri()),
    )
    .expect("registrar client")
}

/// 指向 mock server 的 DNS 客户端
pub fn dns_provider_for(server: &MockServer) -> Arc<dyn DnsRecordProvider> {
    create_dns_provider(TEST_TOKEN.to_string(), Some(&server.uri())).expect("dns client")
}

/// 请求体中应携带的凭证字段
pub fn credential_fields() -> Value {
    json!({ "apikey": TEST_API_KEY, "secretapikey": TEST_SECRET_KEY })
}

pub fn porkbun_success(extra: Value) -> Value {
    let mut body = json!({ "status": "SUCCESS" });
    if let (Some(map), Value::Object(extra)) = (body.as_object_mut(), extra) {
        map.extend(extra);
    }
    body
}

pub fn porkbun_error(message: &str) -> Value {
    json!({ "status": "ERROR", "message": message })
}

pub fn cf_success(result: Value) -> Value {
    json!({ "success": true, "errors": [], "messages": [], "result": result })
}

pub fn cf_failure(code: i64, message: &str) -> Value {
    json!({
        "success": false,
        "errors": [{ "code": code, "message": message }],
        "messages": [],
        "result": null
    })
}
