//! Request bodies. Responses deserialize straight into the core models.

use serde::Serialize;

use vms_core::{InvestmentRecord, StartupId};

#[derive(Debug, Serialize)]
pub(crate) struct IdsBody<'a> {
    pub ids: &'a [StartupId],
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct InvestmentBody<'a> {
    pub name: &'a str,
    pub invest_amount: f64,
    pub comment: &'a str,
    pub password: &'a str,
}

impl<'a> From<&'a InvestmentRecord> for InvestmentBody<'a> {
    fn from(record: &'a InvestmentRecord) -> Self {
        Self {
            name: &record.name,
            invest_amount: record.invest_amount,
            comment: &record.comment,
            password: record.password.expose(),
        }
    }
}
