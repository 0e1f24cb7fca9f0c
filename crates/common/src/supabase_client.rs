use reqwest::{Client, Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, info};

use crate::error::{PlatformError, PlatformResult};

/// Thin client over the PostgREST endpoint (`<project>/rest/v1`).
#[derive(Clone)]
pub struct SupabaseRestClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl SupabaseRestClient {
    pub fn new(base_url: &str, api_key: &str) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        }
    }

    pub fn table_url(&self, table: &str) -> String {
        format!("{}/{}", self.base_url, table.trim_start_matches('/'))
    }

    fn request(&self, method: Method, table: &str) -> RequestBuilder {
        self.client
            .request(method, self.table_url(table))
            .header("apikey", &self.api_key)
            .header("Authorization", format!("Bearer {}", self.api_key))
    }

    pub async fn select<T: DeserializeOwned>(
        &self,
        table: &str,
        query: &[(&str, String)],
    ) -> PlatformResult<Vec<T>> {
        debug!("Selecting from {} with {:?}", table, query);
        let response = self
            .request(Method::GET, table)
            .query(query)
            .send()
            .await?;
        decode_rows(check_status(response).await?).await
    }

    /// PATCHes every row matched by `filters` and returns the updated rows.
    pub async fn update<B, T>(
        &self,
        table: &str,
        filters: &[(&str, String)],
        body: &B,
    ) -> PlatformResult<Vec<T>>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        debug!("Updating {} where {:?}", table, filters);
        let response = self
            .request(Method::PATCH, table)
            .query(filters)
            .header("Prefer", "return=representation")
            .json(body)
            .send()
            .await?;
        decode_rows(check_status(response).await?).await
    }

    pub async fn insert<B, T>(&self, table: &str, body: &B) -> PlatformResult<Vec<T>>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        debug!("Inserting into {}", table);
        let response = self
            .request(Method::POST, table)
            .header("Prefer", "return=representation")
            .json(body)
            .send()
            .await?;
        decode_rows(check_status(response).await?).await
    }

    /// Inserts without reading rows back; an existing duplicate row is kept.
    pub async fn insert_ignoring_duplicates<B>(&self, table: &str, body: &B) -> PlatformResult<()>
    where
        B: Serialize + ?Sized,
    {
        debug!("Inserting (ignore duplicates) into {}", table);
        let response = self
            .request(Method::POST, table)
            .header("Prefer", "return=minimal,resolution=ignore-duplicates")
            .json(body)
            .send()
            .await?;
        check_status(response).await?;
        Ok(())
    }

    pub async fn delete(&self, table: &str, filters: &[(&str, String)]) -> PlatformResult<()> {
        debug!("Deleting from {} where {:?}", table, filters);
        let response = self
            .request(Method::DELETE, table)
            .query(filters)
            .send()
            .await?;
        check_status(response).await?;
        Ok(())
    }
}

async fn check_status(response: Response) -> PlatformResult<Response> {
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        let body = response.text().await.unwrap_or_default();
        Err(PlatformError::Api {
            status: status.as_u16(),
            body,
        })
    }
}

async fn decode_rows<T: DeserializeOwned>(response: Response) -> PlatformResult<Vec<T>> {
    let text = response.text().await?;
    if text.trim().is_empty() {
        return Ok(Vec::new());
    }
    serde_json::from_str(&text).map_err(|e| PlatformError::Decode(e.to_string()))
}

#[derive(Clone)]
pub struct SupabaseStorageClient {
    client: Client,
    base_url: String,
    api_key: String,
    bucket_name: String,
}

impl SupabaseStorageClient {
    pub fn new(base_url: &str, api_key: &str, bucket_name: &str) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            bucket_name: bucket_name.to_string(),
        }
    }

    pub fn object_url(&self, path: &str) -> String {
        format!(
            "{}/object/{}/{}",
            self.base_url,
            self.bucket_name,
            path.trim_start_matches('/')
        )
    }

    pub async fn upload_file(&self, path: &str, content: String, content_type: &str) -> PlatformResult<()> {
        let url = self.object_url(path);

        info!("Uploading to Supabase Storage: {} ({} bytes)", url, content.len());

        let response = self
            .client
            .post(&url)
            .header("apikey", &self.api_key)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", content_type)
            .header("x-upsert", "true")
            .body(content)
            .send()
            .await?;

        if response.status().is_success() {
            info!("Successfully uploaded {} to Supabase Storage.", path);
            Ok(())
        } else {
            let error_text = response.text().await.unwrap_or_default();
            Err(PlatformError::StorageUpload(format!("{}: {}", url, error_text)))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_urls_are_normalized() {
        let rest = SupabaseRestClient::new("https://abc.supabase.co/rest/v1/", "key");
        assert_eq!(rest.table_url("/posts"), "https://abc.supabase.co/rest/v1/posts");

        let storage = SupabaseStorageClient::new("https://abc.supabase.co/storage/v1", "key", "reports");
        assert_eq!(
            storage.object_url("/trending/2026-10-19/trending-topics.json"),
            "https://abc.supabase.co/storage/v1/object/reports/trending/2026-10-19/trending-topics.json"
        );
    }
}
