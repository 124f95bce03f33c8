use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("No data loaded. Upload a fund export first")]
    NoDataLoaded,

    #[error("Fund {0} not found")]
    FundNotFound(u32),

    #[error("Fund {fund_id} has no return observations in the requested range")]
    EmptyRange { fund_id: u32 },
}
