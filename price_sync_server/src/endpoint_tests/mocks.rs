use async_trait::async_trait;
use mockall::mock;
use ozon_tools::{FetchedPrices, OzonCredential};
use price_sync_engine::{
    db_types::{AccountSelector, PriceRecord},
    traits::{AccountDirectory, AccountDirectoryError, PriceSource, PriceStore, PriceStoreError},
};

mock! {
    pub Directory {}
    #[async_trait]
    impl AccountDirectory for Directory {
        async fn resolve(&self, selector: &AccountSelector) -> Result<Vec<OzonCredential>, AccountDirectoryError>;
    }
}

mock! {
    pub Source {}
    #[async_trait]
    impl PriceSource for Source {
        async fn fetch_prices(&self, credential: &OzonCredential) -> FetchedPrices;
    }
}

mock! {
    pub Store {}
    #[async_trait]
    impl PriceStore for Store {
        async fn save_price_records(&self, records: &[PriceRecord]) -> Result<(), PriceStoreError>;
        async fn delete_duplicate_prices(&self) -> Result<(), PriceStoreError>;
    }
}
