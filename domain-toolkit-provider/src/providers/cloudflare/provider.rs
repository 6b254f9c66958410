//! Cloudflare DnsRecordProvider trait 实现

use async_trait::async_trait;

use crate::error::Result;
use crate::traits::{DnsRecordProvider, ErrorContext, ProviderErrorMapper};
use crate::types::{DnsRecord, DnsRecordRequest, DnsRecordType};

use super::CloudflareDnsRecord;
use super::CloudflareProvider;
use super::types::CloudflareRecordBody;

impl CloudflareProvider {
    /// 将 Cloudflare 记录转换为 `DnsRecord`
    pub(crate) fn cf_record_to_dns_record(&self, cf_record: CloudflareDnsRecord) -> Result<DnsRecord> {
        let record_type = DnsRecordType::parse(&cf_record.record_type, self.provider_name())?;

        Ok(DnsRecord {
            id: cf_record.id,
            record_type,
            name: cf_record.name,
            content: cf_record.content,
            ttl: cf_record.ttl,
            proxied: cf_record.proxied,
        })
    }

    fn record_body(req: &DnsRecordRequest) -> CloudflareRecordBody<'_> {
        CloudflareRecordBody {
            record_type: req.record_type.as_str(),
            name: &req.name,
            content: &req.content,
            ttl: req.ttl,
            proxied: req.proxied,
        }
    }

    fn record_context(zone_id: &str, name: &str) -> ErrorContext {
        ErrorContext {
            domain: Some(zone_id.to_string()),
            record_name: Some(name.to_string()),
        }
    }
}

#[async_trait]
impl DnsRecordProvider for CloudflareProvider {
    fn id(&self) -> &'static str {
        self.provider_name()
    }

    async fn find_records(
        &self,
        zone_id: &str,
        name: &str,
        record_type: DnsRecordType,
    ) -> Result<Vec<DnsRecord>> {
        let path = format!(
            "/zones/{}/dns_records?name={}&type={}",
            urlencoding::encode(zone_id),
            urlencoding::encode(name),
            record_type.as_str()
        );
        let cf_records: Vec<CloudflareDnsRecord> = self
            .get(&path, Self::record_context(zone_id, name))
            .await?;

        cf_records
            .into_iter()
            .map(|r| self.cf_record_to_dns_record(r))
            .collect()
    }

    async fn create_record(&self, zone_id: &str, req: &DnsRecordRequest) -> Result<DnsRecord> {
        let path = format!("/zones/{}/dns_records", urlencoding::encode(zone_id));
        let cf_record: CloudflareDnsRecord = self
            .post(
                &path,
                &Self::record_body(req),
                Self::record_context(zone_id, &req.name),
            )
            .await?;
        self.cf_record_to_dns_record(cf_record)
    }

    async fn update_record(
        &self,
        zone_id: &str,
        record_id: &str,
        req: &DnsRecordRequest,
    ) -> Result<DnsRecord> {
        let path = format!(
            "/zones/{}/dns_records/{}",
            urlencoding::encode(zone_id),
            urlencoding::encode(record_id)
        );
        let cf_record: CloudflareDnsRecord = self
            .put(
                &path,
                &Self::record_body(req),
                Self::record_context(zone_id, &req.name),
            )
            .await?;
        self.cf_record_to_dns_record(cf_record)
    }
}
