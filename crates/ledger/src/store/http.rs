use api_types::{
    ErrorBody,
    transaction::{TransactionDoc, TransactionListResponse},
};
use async_trait::async_trait;
use reqwest::{Response, StatusCode, Url};

use super::TransactionStore;
use crate::{StoreError, Transaction};

/// HTTP adapter for the remote document store.
///
/// Speaks the narrow CRUD wire: `POST /transactions`,
/// `GET /transactions?owner_id=`, `PUT /transactions/{id}`,
/// `DELETE /transactions/{id}`. A 404 maps to [`StoreError::NotFound`];
/// every other non-success status and all transport failures map to
/// [`StoreError::Unavailable`].
#[derive(Debug, Clone)]
pub struct HttpStore {
    base_url: Url,
    http: reqwest::Client,
}

impl HttpStore {
    pub fn new(base_url: &str) -> Result<Self, StoreError> {
        let base_url = Url::parse(base_url)
            .map_err(|err| StoreError::Unavailable(format!("invalid base_url: {err}")))?;
        Ok(Self {
            base_url,
            http: reqwest::Client::new(),
        })
    }

    fn endpoint(&self, path: &str) -> Result<Url, StoreError> {
        self.base_url
            .join(path)
            .map_err(|err| StoreError::Unavailable(format!("invalid base_url: {err}")))
    }
}

fn transport(err: reqwest::Error) -> StoreError {
    StoreError::Unavailable(err.to_string())
}

async fn error_for(res: Response) -> StoreError {
    let status = res.status();
    let body = res
        .json::<ErrorBody>()
        .await
        .map(|err| err.error)
        .unwrap_or_else(|_| "unknown error".to_string());

    match status {
        StatusCode::NOT_FOUND => StoreError::NotFound(body),
        _ => StoreError::Unavailable(body),
    }
}

fn decode(doc: TransactionDoc) -> Result<Transaction, StoreError> {
    Transaction::try_from(doc)
        .map_err(|err| StoreError::Unavailable(format!("malformed document: {err}")))
}

#[async_trait]
impl TransactionStore for HttpStore {
    async fn create(&self, tx: &Transaction) -> Result<Transaction, StoreError> {
        let endpoint = self.endpoint("transactions")?;
        let res = self
            .http
            .post(endpoint)
            .json(&TransactionDoc::from(tx))
            .send()
            .await
            .map_err(transport)?;

        if !res.status().is_success() {
            return Err(error_for(res).await);
        }

        let doc = res.json::<TransactionDoc>().await.map_err(transport)?;
        decode(doc)
    }

    async fn list_by_owner(&self, owner_id: &str) -> Result<Vec<Transaction>, StoreError> {
        let endpoint = self.endpoint("transactions")?;
        let res = self
            .http
            .get(endpoint)
            .query(&[("owner_id", owner_id)])
            .send()
            .await
            .map_err(transport)?;

        if !res.status().is_success() {
            return Err(error_for(res).await);
        }

        let body = res
            .json::<TransactionListResponse>()
            .await
            .map_err(transport)?;
        body.transactions.into_iter().map(decode).collect()
    }

    async fn update(&self, tx: &Transaction) -> Result<(), StoreError> {
        let endpoint = self.endpoint(&format!("transactions/{}", tx.id))?;
        let res = self
            .http
            .put(endpoint)
            .json(&TransactionDoc::from(tx))
            .send()
            .await
            .map_err(transport)?;

        if !res.status().is_success() {
            return Err(error_for(res).await);
        }
        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<(), StoreError> {
        let endpoint = self.endpoint(&format!("transactions/{id}"))?;
        let res = self.http.delete(endpoint).send().await.map_err(transport)?;

        if !res.status().is_success() {
            return Err(error_for(res).await);
        }
        Ok(())
    }
}
