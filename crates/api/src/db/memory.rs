//! In-process store used by tests and local experiments.
//!
//! Mirrors the Postgres constraints: usernames and product codes are unique,
//! account ids are assigned sequentially starting at 1.

use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use warung_core::{AccountId, ProductCode, Role, Username, ValidationError};

use super::{AccountStore, ProductStore, RepositoryError, UniqueField};
use crate::models::{Account, AccountCredentials, Product, ProductPatch};

#[derive(Default)]
struct Accounts {
    rows: Vec<AccountCredentials>,
    next_id: i32,
}

/// Account and product storage held in memory.
#[derive(Default)]
pub struct MemoryStore {
    accounts: RwLock<Accounts>,
    products: RwLock<BTreeMap<ProductCode, Product>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AccountStore for MemoryStore {
    async fn create(
        &self,
        username: &Username,
        password_hash: &str,
        role: Role,
    ) -> Result<Account, RepositoryError> {
        let mut accounts = self.accounts.write().await;
        if accounts
            .rows
            .iter()
            .any(|row| row.account.username == *username)
        {
            return Err(RepositoryError::Conflict(UniqueField::Username));
        }

        accounts.next_id += 1;
        let account = Account {
            id: AccountId::new(accounts.next_id),
            username: username.clone(),
            role,
        };
        accounts.rows.push(AccountCredentials {
            account: account.clone(),
            password_hash: password_hash.to_owned(),
        });

        Ok(account)
    }

    async fn find_credentials(
        &self,
        username: &Username,
    ) -> Result<Option<AccountCredentials>, RepositoryError> {
        let accounts = self.accounts.read().await;
        Ok(accounts
            .rows
            .iter()
            .find(|row| row.account.username == *username)
            .cloned())
    }
}

#[async_trait]
impl ProductStore for MemoryStore {
    async fn list(&self) -> Result<Vec<Product>, RepositoryError> {
        Ok(self.products.read().await.values().cloned().collect())
    }

    async fn get(&self, code: &ProductCode) -> Result<Option<Product>, RepositoryError> {
        Ok(self.products.read().await.get(code).cloned())
    }

    async fn create(&self, product: &Product) -> Result<Product, RepositoryError> {
        let mut products = self.products.write().await;
        if products.contains_key(&product.code) {
            return Err(RepositoryError::Conflict(UniqueField::ProductCode));
        }
        products.insert(product.code.clone(), product.clone());
        Ok(product.clone())
    }

    async fn update(
        &self,
        code: &ProductCode,
        patch: &ProductPatch,
    ) -> Result<Option<Product>, RepositoryError> {
        if patch.is_empty() {
            return Err(ValidationError::general("no fields to update").into());
        }

        let mut products = self.products.write().await;
        Ok(products.get_mut(code).map(|product| {
            patch.apply_to(product);
            product.clone()
        }))
    }

    async fn delete(&self, code: &ProductCode) -> Result<bool, RepositoryError> {
        Ok(self.products.write().await.remove(code).is_some())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rust_decimal::Decimal;
    use warung_core::{Price, ProductName, StockStatus};

    use super::*;

    fn product(code: &str) -> Product {
        Product {
            code: ProductCode::parse(code).unwrap(),
            name: ProductName::parse("Gula 1kg").unwrap(),
            price: Price::new(Decimal::new(15_000, 0)).unwrap(),
            stock_status: StockStatus::Available,
        }
    }

    #[tokio::test]
    async fn test_account_ids_are_sequential() {
        let store = MemoryStore::new();
        let a = AccountStore::create(&store, &Username::parse("a").unwrap(), "h", Role::User)
            .await
            .unwrap();
        let b = AccountStore::create(&store, &Username::parse("b").unwrap(), "h", Role::Admin)
            .await
            .unwrap();
        assert_eq!(a.id.as_i32(), 1);
        assert_eq!(b.id.as_i32(), 2);
    }

    #[tokio::test]
    async fn test_duplicate_username_conflicts() {
        let store = MemoryStore::new();
        let name = Username::parse("Alice").unwrap();
        AccountStore::create(&store, &name, "h", Role::User)
            .await
            .unwrap();

        let again = Username::parse("alice").unwrap();
        let err = AccountStore::create(&store, &again, "h", Role::User)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            RepositoryError::Conflict(UniqueField::Username)
        ));
    }

    #[tokio::test]
    async fn test_duplicate_product_code_conflicts() {
        let store = MemoryStore::new();
        ProductStore::create(&store, &product("ab1")).await.unwrap();
        let err = ProductStore::create(&store, &product("AB1"))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "conflict on code");
    }

    #[tokio::test]
    async fn test_update_missing_product_is_none() {
        let store = MemoryStore::new();
        let patch = ProductPatch {
            name: None,
            price: Some(Price::new(Decimal::new(500, 0)).unwrap()),
            stock_status: None,
        };
        let updated = store
            .update(&ProductCode::parse("zz9").unwrap(), &patch)
            .await
            .unwrap();
        assert!(updated.is_none());
    }

    #[tokio::test]
    async fn test_empty_patch_is_invalid_not_a_no_op() {
        let store = MemoryStore::new();
        ProductStore::create(&store, &product("ab1")).await.unwrap();
        let patch = ProductPatch {
            name: None,
            price: None,
            stock_status: None,
        };

        let err = store
            .update(&ProductCode::parse("ab1").unwrap(), &patch)
            .await
            .unwrap_err();
        assert!(matches!(err, RepositoryError::Invalid(_)));
        assert_eq!(err.to_string(), "no fields to update");
    }

    #[tokio::test]
    async fn test_delete_reports_whether_removed() {
        let store = MemoryStore::new();
        ProductStore::create(&store, &product("ab1")).await.unwrap();
        let code = ProductCode::parse("ab1").unwrap();
        assert!(store.delete(&code).await.unwrap());
        assert!(!store.delete(&code).await.unwrap());
    }

    #[tokio::test]
    async fn test_list_ordered_by_code() {
        let store = MemoryStore::new();
        ProductStore::create(&store, &product("b2")).await.unwrap();
        ProductStore::create(&store, &product("a1")).await.unwrap();
        let codes: Vec<String> = store
            .list()
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.code.to_string())
            .collect();
        assert_eq!(codes, vec!["A1", "B2"]);
    }
}
