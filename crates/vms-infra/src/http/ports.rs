//! Port implementations for [`HttpBackend`].

use async_trait::async_trait;
use tracing::debug;

use vms_core::ports::{
    BackendError, BackendOperation, ComparisonPort, InvestmentPort, RankPort, SelectionPort,
    StartupCatalogPort,
};
use vms_core::{
    InvestmentRecord, InvestorId, Page, PageQuery, RankedStartup, SortToken, Startup, StartupId,
};

use super::client::{sort_query, HttpBackend};
use super::dto::{IdsBody, InvestmentBody};

#[async_trait]
impl SelectionPort for HttpBackend {
    async fn register_selection(&self, id: StartupId) -> Result<(), BackendError> {
        let operation = BackendOperation::RegisterSelection;
        let request = self.post(operation, &format!("selections/{id}"))?;
        self.send(operation, request).await?;
        Ok(())
    }

    async fn unregister_selection(&self, id: StartupId) -> Result<(), BackendError> {
        let operation = BackendOperation::UnregisterSelection;
        let request = self.delete(operation, &format!("selections/{id}"))?;
        self.send(operation, request).await?;
        Ok(())
    }
}

#[async_trait]
impl ComparisonPort for HttpBackend {
    async fn submit_comparison_set(&self, ids: Vec<StartupId>) -> Result<(), BackendError> {
        let operation = BackendOperation::SubmitComparisonSet;
        let request = self
            .post(operation, "comparisons")?
            .json(&IdsBody { ids: &ids });
        self.send(operation, request).await?;
        Ok(())
    }

    async fn cancel_comparison_set(&self, ids: Vec<StartupId>) -> Result<(), BackendError> {
        let operation = BackendOperation::CancelComparisonSet;
        let request = self
            .post(operation, "comparisons/cancel")?
            .json(&IdsBody { ids: &ids });
        self.send(operation, request).await?;
        Ok(())
    }

    async fn fetch_comparison_results(
        &self,
        sort: SortToken,
    ) -> Result<Vec<Startup>, BackendError> {
        let operation = BackendOperation::FetchComparisonResults;
        let request = self
            .get(operation, "comparisons/results")?
            .query(&sort_query(&sort));
        self.send_json(operation, request).await
    }
}

#[async_trait]
impl RankPort for HttpBackend {
    async fn fetch_rank_results(
        &self,
        reference: StartupId,
        sort: SortToken,
    ) -> Result<Vec<RankedStartup>, BackendError> {
        let operation = BackendOperation::FetchRankResults;
        let request = self
            .get(operation, &format!("startups/{reference}/rank"))?
            .query(&sort_query(&sort));
        self.send_json(operation, request).await
    }
}

#[async_trait]
impl InvestmentPort for HttpBackend {
    async fn submit_investment(
        &self,
        investor: InvestorId,
        record: &InvestmentRecord,
    ) -> Result<u16, BackendError> {
        let operation = BackendOperation::SubmitInvestment;
        let request = self
            .patch(operation, &format!("investments/{investor}"))?
            .json(&InvestmentBody::from(record));
        let status = self.send_raw(operation, request).await?.status().as_u16();
        debug!(%investor, status, "investment update answered");
        Ok(status)
    }
}

#[async_trait]
impl StartupCatalogPort for HttpBackend {
    async fn get_startup(&self, id: StartupId) -> Result<Startup, BackendError> {
        let operation = BackendOperation::GetStartup;
        let request = self.get(operation, &format!("startups/{id}"))?;
        self.send_json(operation, request).await
    }

    async fn list_startups(&self, query: PageQuery) -> Result<Page<Startup>, BackendError> {
        let operation = BackendOperation::ListStartups;
        let mut params = vec![
            ("page", query.page.to_string()),
            ("pageSize", query.page_size.to_string()),
        ];
        if let Some(keyword) = query.keyword.filter(|k| !k.trim().is_empty()) {
            params.push(("keyword", keyword));
        }
        if let Some(sort) = &query.sort {
            params.extend(sort_query(sort));
        }
        let request = self.get(operation, "startups")?.query(&params);
        self.send_json(operation, request).await
    }
}
