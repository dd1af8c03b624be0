//! Factory functions for creating use cases with AppDeps
//! 使用 AppDeps 创建用例的工厂函数

use std::sync::Arc;

use vms_core::AppConfig;

use crate::deps::AppDeps;
use crate::usecases::{
    CompareSessionCoordinator, GetStartup, ListStartups, MySelection, RankQueryController,
    SelectionStore, SubmitInvestment,
};

/// Every use case the outer surface needs, built from one [`AppDeps`].
/// 外层界面所需的全部用例。
pub struct UseCases {
    pub my_selection: MySelection,
    pub submit_investment: SubmitInvestment,
    pub get_startup: GetStartup,
    pub list_startups: ListStartups,
}

impl UseCases {
    pub fn new(deps: AppDeps, config: &AppConfig) -> Self {
        let store = Arc::new(SelectionStore::new(config.selection.candidate_limit));

        let compare = Arc::new(CompareSessionCoordinator::new(
            store.subscribe(),
            deps.selection.clone(),
            deps.comparison.clone(),
            config.sort.comparison.clone(),
        ));
        let rank = Arc::new(RankQueryController::new(
            deps.rank.clone(),
            config.sort.rank.clone(),
        ));

        Self {
            my_selection: MySelection::new(store, compare, rank),
            submit_investment: SubmitInvestment::new(deps.investment.clone(), config.ui.locale),
            get_startup: GetStartup::new(deps.catalog.clone()),
            list_startups: ListStartups::new(deps.catalog),
        }
    }
}
