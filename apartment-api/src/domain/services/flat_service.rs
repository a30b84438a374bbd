use std::sync::Arc;

use crate::domain::models::{Flat, FlatOwner};
use crate::error::AppError;
use crate::server::AppState;

pub struct FlatService {
    state: Arc<AppState>,
}

impl FlatService {
    pub fn new(state: Arc<AppState>) -> Self {
        Self { state }
    }

    pub async fn create_flat(&self, flat_no: i32) -> Result<(), AppError> {
        self.state.flats.create(flat_no).await?;
        tracing::info!(flat_no, "Flat created");
        Ok(())
    }

    /// 设置业主，密码加密后写入
    pub async fn set_owner(&self, owner: FlatOwner) -> Result<(), AppError> {
        let encrypted_password = self.state.cipher.encrypt(&owner.password)?;
        self.state.flats.update_owner(&owner, &encrypted_password).await?;

        tracing::info!(flat_no = owner.flat_no, "Flat owner updated");
        Ok(())
    }

    pub async fn delete_flat(&self, flat_no: i32) -> Result<(), AppError> {
        self.state.flats.delete(flat_no).await?;
        tracing::info!(flat_no, "Flat deleted");
        Ok(())
    }

    /// 单户查询，按配置决定是否带出解密后的密码
    pub async fn get_flat(&self, flat_no: i32) -> Result<Flat, AppError> {
        let mut flat = self
            .state
            .flats
            .find_by_flat_no(flat_no)
            .await?
            .ok_or(AppError::FlatNotFound)?;

        flat.password = if self.state.config.auth.expose_tenant_password && !flat.password.is_empty() {
            self.state.cipher.decrypt(&flat.password)?
        } else {
            String::new()
        };

        Ok(flat)
    }

    pub async fn list_flats(&self) -> Result<Vec<Flat>, AppError> {
        self.state.flats.find_all().await
    }

    pub async fn add_dues(&self, flat_no: i32) -> Result<(), AppError> {
        self.state.flats.add_dues(flat_no).await
    }

    pub async fn delete_dues(&self, flat_no: i32) -> Result<(), AppError> {
        self.state.flats.delete_dues(flat_no).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::services::test_support::{state, Mocks};
    use common::CredentialCipher;

    fn owner() -> FlatOwner {
        FlatOwner {
            flat_no: 101,
            owner_name: "Ayse".to_string(),
            owner_surname: "Yilmaz".to_string(),
            mail: "tenant@example.com".to_string(),
            password: "secret-pass".to_string(),
            dues_count: Some(2),
        }
    }

    #[tokio::test]
    async fn test_create_flat_twice() {
        let mut mocks = Mocks::default();
        let mut seq = mockall::Sequence::new();
        mocks
            .flats
            .expect_create()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(()));
        mocks
            .flats
            .expect_create()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Err(AppError::FlatAlreadyExists));
        let service = FlatService::new(state(mocks));

        service.create_flat(101).await.unwrap();
        let result = service.create_flat(101).await;
        assert!(matches!(result, Err(AppError::FlatAlreadyExists)));
    }

    #[tokio::test]
    async fn test_set_owner_encrypts_password() {
        let mut mocks = Mocks::default();
        mocks
            .flats
            .expect_update_owner()
            .withf(|owner, encrypted| {
                let cipher = CredentialCipher::new(b"1234567890abcdef").unwrap();
                owner.flat_no == 101
                    && encrypted != "secret-pass"
                    && cipher.decrypt(encrypted).unwrap() == "secret-pass"
            })
            .times(1)
            .returning(|_, _| Ok(()));
        let service = FlatService::new(state(mocks));

        service.set_owner(owner()).await.unwrap();
    }

    #[tokio::test]
    async fn test_get_flat_decrypts_password() {
        let cipher = CredentialCipher::new(b"1234567890abcdef").unwrap();
        let encrypted = cipher.encrypt("secret-pass").unwrap();

        let mut mocks = Mocks::default();
        mocks.flats.expect_find_by_flat_no().returning(move |flat_no| {
            Ok(Some(Flat {
                flat_no,
                owner_name: "Ayse".to_string(),
                owner_surname: "Yilmaz".to_string(),
                mail: Some("tenant@example.com".to_string()),
                password: encrypted.clone(),
                dues_count: 1,
            }))
        });
        let service = FlatService::new(state(mocks));

        let flat = service.get_flat(101).await.unwrap();
        assert_eq!(flat.password, "secret-pass");
    }

    #[tokio::test]
    async fn test_get_flat_missing_and_empty() {
        let mut mocks = Mocks::default();
        mocks
            .flats
            .expect_find_by_flat_no()
            .returning(|flat_no| Ok((flat_no == 5).then(|| Flat::new(5))));
        let service = FlatService::new(state(mocks));

        // 新建的空户没有密码，不解密
        let flat = service.get_flat(5).await.unwrap();
        assert_eq!(flat.password, "");

        let result = service.get_flat(6).await;
        assert!(matches!(result, Err(AppError::FlatNotFound)));
    }

    #[tokio::test]
    async fn test_delete_dues_at_zero() {
        let mut mocks = Mocks::default();
        mocks
            .flats
            .expect_delete_dues()
            .returning(|_| Err(AppError::NoDues));
        let service = FlatService::new(state(mocks));

        let err = service.delete_dues(101).await.unwrap_err();
        assert_eq!(err.to_string(), "there is no dues");
    }
}
