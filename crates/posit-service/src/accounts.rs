//! Registration, authentication and person lookups.

use chrono::Utc;

use posit_core::astral::AstralProfile;
use posit_core::entities::{Account, Client, ClientRegistration, Employee, Person};
use posit_core::errors::CoreError;
use posit_core::ids::PREFIX_CLIENT;
use posit_db::{DatabaseError, UnitOfWork};

use crate::error::ServiceError;
use crate::{ConsultationService, credential, notices};

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

fn validate(registration: &ClientRegistration, email: &str) -> Result<(), CoreError> {
    let required = [
        ("first_name", registration.first_name.as_str()),
        ("last_name", registration.last_name.as_str()),
        ("phone", registration.phone.as_str()),
        ("postal_address", registration.postal_address.as_str()),
    ];
    if let Some((field, _)) = required.iter().find(|(_, v)| v.trim().is_empty()) {
        return Err(CoreError::Validation(format!("{field} must not be empty")));
    }
    if !email.contains('@') {
        return Err(CoreError::Validation(format!("'{email}' is not a mail address")));
    }
    if registration.password.is_empty() {
        return Err(CoreError::Validation("password must not be empty".into()));
    }
    if registration.birth_date > Utc::now().date_naive() {
        return Err(CoreError::Validation("birth date is in the future".into()));
    }
    Ok(())
}

impl ConsultationService {
    /// Register a new client and mail them the outcome.
    ///
    /// The astral profile is derived from the birth date. On any failure a
    /// failure mail is sent instead of the confirmation and nothing is stored.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::DuplicateEmail` if the email is taken,
    /// `ServiceError::Core` if a field is invalid, or a store error.
    pub async fn register(&self, registration: ClientRegistration) -> Result<Client, ServiceError> {
        let email = normalize_email(&registration.email);
        let outcome = self.try_register(&registration, &email).await;
        match &outcome {
            Ok(client) => {
                tracing::info!(client_id = %client.person.id, %email, "client registered");
                self.notifier
                    .send_mail(&notices::registration_confirmed(&self.sender, client));
            }
            Err(error) => {
                tracing::warn!(%email, %error, "registration failed");
                if email.contains('@') {
                    self.notifier.send_mail(&notices::registration_failed(
                        &self.sender,
                        registration.first_name.trim(),
                        &email,
                    ));
                }
            }
        }
        outcome
    }

    async fn try_register(
        &self,
        registration: &ClientRegistration,
        email: &str,
    ) -> Result<Client, ServiceError> {
        validate(registration, email)?;
        let password_hash = credential::hash(&registration.password)?;
        let uow = self.db.begin().await?;
        let result = Self::insert_registration(&uow, registration, email, &password_hash).await;
        uow.finish(result).await
    }

    async fn insert_registration(
        uow: &UnitOfWork<'_>,
        registration: &ClientRegistration,
        email: &str,
        password_hash: &str,
    ) -> Result<Client, ServiceError> {
        if uow.email_taken(email).await? {
            return Err(ServiceError::DuplicateEmail(email.to_string()));
        }
        let client = Client {
            person: Person {
                id: uow.generate_id(PREFIX_CLIENT).await?,
                first_name: registration.first_name.trim().to_string(),
                last_name: registration.last_name.trim().to_string(),
                email: email.to_string(),
                phone: registration.phone.trim().to_string(),
                created_at: Utc::now(),
            },
            birth_date: registration.birth_date,
            postal_address: registration.postal_address.trim().to_string(),
            astral: AstralProfile::from_birth_date(registration.birth_date),
        };
        match uow.insert_client(&client, password_hash).await {
            Ok(()) => Ok(client),
            Err(DatabaseError::UniqueViolation(_)) => {
                Err(ServiceError::DuplicateEmail(email.to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Look up a person by email and check the password.
    ///
    /// Returns `None` for an unknown email or a wrong password.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::Database` if the store fails.
    pub async fn authenticate(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Option<Account>, ServiceError> {
        let email = normalize_email(email);
        let uow = self.db.begin().await?;
        let result = Self::check_login(&uow, &email, password).await;
        let account = uow.finish(result).await?;
        match &account {
            Some(account) => {
                tracing::info!(%email, role = %account.role(), "authenticated");
            }
            None => tracing::info!(%email, "authentication refused"),
        }
        Ok(account)
    }

    async fn check_login(
        uow: &UnitOfWork<'_>,
        email: &str,
        password: &str,
    ) -> Result<Option<Account>, ServiceError> {
        let Some(login) = uow.find_login(email).await? else {
            return Ok(None);
        };
        if !credential::verify(password, &login.password_hash) {
            return Ok(None);
        }
        Ok(uow.get_account(&login.person_id).await?)
    }

    /// # Errors
    ///
    /// Returns `ServiceError::Database` if the store fails.
    pub async fn get_client(&self, id: &str) -> Result<Option<Client>, ServiceError> {
        let uow = self.db.begin().await?;
        let result = uow.get_client(id).await.map_err(ServiceError::from);
        uow.finish(result).await
    }

    /// # Errors
    ///
    /// Returns `ServiceError::Database` if the store fails.
    pub async fn get_employee(&self, id: &str) -> Result<Option<Employee>, ServiceError> {
        let uow = self.db.begin().await?;
        let result = uow.get_employee(id).await.map_err(ServiceError::from);
        uow.finish(result).await
    }

    /// Client or employee, whichever the id belongs to.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::Database` if the store fails.
    pub async fn get_account(&self, id: &str) -> Result<Option<Account>, ServiceError> {
        let uow = self.db.begin().await?;
        let result = uow.get_account(id).await.map_err(ServiceError::from);
        uow.finish(result).await
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use posit_core::astral::ZodiacSign;
    use posit_core::enums::PersonRole;
    use pretty_assertions::assert_eq;

    use crate::ServiceError;
    use crate::test_support::{registration, test_service};

    #[tokio::test]
    async fn register_computes_profile_and_confirms() {
        let (svc, notifier) = test_service().await;
        let client = svc.register(registration("Ada@Example.org")).await.unwrap();

        assert!(client.person.id.starts_with("cli-"));
        assert_eq!(client.person.email, "ada@example.org");
        assert_eq!(client.astral.zodiac_sign, ZodiacSign::Virgo);
        assert_eq!(client.astral.lucky_color, "Navy blue");
        assert_eq!(svc.get_client(&client.person.id).await.unwrap(), Some(client.clone()));

        let mails = notifier.mails();
        assert_eq!(mails.len(), 1);
        assert_eq!(mails[0].to, "ada@example.org");
        assert!(mails[0].body.contains(&client.person.id));
    }

    #[tokio::test]
    async fn duplicate_email_sends_failure_mail() {
        let (svc, notifier) = test_service().await;
        svc.register(registration("ada@example.org")).await.unwrap();
        let err = svc.register(registration("ADA@example.org")).await.unwrap_err();

        assert!(matches!(err, ServiceError::DuplicateEmail(ref e) if e == "ada@example.org"));
        let mails = notifier.mails();
        assert_eq!(mails.len(), 2);
        assert!(mails[1].body.contains("failed"));
    }

    #[tokio::test]
    async fn invalid_registration_stores_nothing() {
        let (svc, notifier) = test_service().await;
        let mut reg = registration("ada@example.org");
        reg.first_name = "  ".into();
        let err = svc.register(reg).await.unwrap_err();
        assert!(matches!(err, ServiceError::Core(_)));
        assert!(svc.authenticate("ada@example.org", "secret").await.unwrap().is_none());
        assert_eq!(notifier.mails().len(), 1);

        let mut reg = registration("ada@example.org");
        reg.birth_date = NaiveDate::from_ymd_opt(2999, 1, 1).unwrap();
        assert!(svc.register(reg).await.is_err());
    }

    #[tokio::test]
    async fn authenticate_needs_matching_password() {
        let (svc, _) = test_service().await;
        let client = svc.register(registration("ada@example.org")).await.unwrap();

        let account = svc
            .authenticate(" ADA@example.org ", "secret")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(account.role(), PersonRole::Client);
        assert_eq!(account.person().id, client.person.id);

        assert!(svc.authenticate("ada@example.org", "Secret").await.unwrap().is_none());
        assert!(svc.authenticate("bob@example.org", "secret").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn seeded_employee_can_log_in() {
        let (svc, _) = test_service().await;
        svc.seed_catalog().await.unwrap();
        let account = svc
            .authenticate("liam.bette@posit.if", "toto123")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(account.role(), PersonRole::Employee);
        let same = svc.get_account(&account.person().id).await.unwrap();
        assert_eq!(same, Some(account));
    }
}
