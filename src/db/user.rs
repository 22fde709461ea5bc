use crate::composition::Gender;
use crate::db::postgres_service::PostgresService;
use crate::types::user::{DBUserCreate, RUpdateProfile};
use crate::types::error::AppError;
use crate::utils::token::{self, construct_token, encrypt, extract_token_parts, new_secret, verify};
use chrono::Utc;
use entity::user::{ActiveModel as UserActive, Entity as User, Model as UserModel};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, Set, TransactionTrait,
};
use uuid::Uuid;

impl PostgresService {
    pub async fn user_exists_by_email(&self, email: &str) -> Result<bool, AppError> {
        Ok(User::find()
            .filter(entity::user::Column::Email.eq(email))
            .count(&self.database_connection)
            .await?
            > 0)
    }

    pub async fn user_exists_by_username(&self, username: &str) -> Result<bool, AppError> {
        Ok(User::find()
            .filter(entity::user::Column::Username.eq(username))
            .count(&self.database_connection)
            .await?
            > 0)
    }

    pub async fn get_user_by_id(&self, id: &Uuid) -> Result<UserModel, AppError> {
        Ok(User::find_by_id(*id)
            .one(&self.database_connection)
            .await?
            .ok_or_else(|| DbErr::RecordNotFound("User does not exist".into()))?)
    }

    pub async fn get_user_by_email(&self, email: &str) -> Result<UserModel, AppError> {
        Ok(User::find()
            .filter(entity::user::Column::Email.eq(email))
            .one(&self.database_connection)
            .await?
            .ok_or_else(|| DbErr::RecordNotFound("User does not exist".into()))?)
    }

    pub async fn get_user_by_username(&self, username: &str) -> Result<UserModel, AppError> {
        Ok(User::find()
            .filter(entity::user::Column::Username.eq(username))
            .one(&self.database_connection)
            .await?
            .ok_or_else(|| DbErr::RecordNotFound("User does not exist".into()))?)
    }

    /// Signup: create user. Uniqueness of username and email is checked
    /// here so callers get domain errors instead of raw constraint noise.
    pub async fn create_user(&self, payload: DBUserCreate) -> Result<Uuid, AppError> {
        if self.user_exists_by_username(&payload.username).await? {
            return Err(AppError::Conflict("Username already exists".into()));
        }
        if self.user_exists_by_email(&payload.email).await? {
            return Err(AppError::Conflict("Email already registered".into()));
        }
        let uid = token::new_id();
        let now = Utc::now();
        let txn = self.database_connection.begin().await?;

        User::insert(UserActive {
            id: Set(uid),
            username: Set(payload.username),
            password_hash: Set(payload.password_hash),
            name: Set(payload.name),
            designation: Set(payload.designation),
            department: Set(payload.department),
            email: Set(payload.email),
            gender: Set(None),
            skills: Set(payload.skills),
            experience: Set(payload.experience),
            auth_hash: Set(None),
            team_id: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
        })
        .exec(&txn)
        .await?;

        txn.commit().await?;
        Ok(uid)
    }

    /// Login succeeded: mint a fresh bearer secret, persist its hash, and
    /// return the wire token. Any previous token stops working.
    pub async fn issue_token(&self, user_id: &Uuid) -> Result<String, AppError> {
        let user = self.get_user_by_id(user_id).await?;
        let secret = new_secret();
        let encrypted = encrypt(&secret).map_err(|_| DbErr::RecordNotUpdated)?;
        let mut am: UserActive = user.into();
        am.auth_hash = Set(Some(encrypted));
        am.updated_at = Set(Utc::now());
        am.update(&self.database_connection).await?;
        Ok(construct_token(&user_id.to_string(), &secret))
    }

    /// Resolves a bearer token to its user, or `Unauthorized`.
    pub async fn authenticate_token(&self, token: &str) -> Result<UserModel, AppError> {
        let (uid, secret) = extract_token_parts(token).ok_or(AppError::Unauthorized)?;
        let user = match self.get_user_by_id(&uid).await {
            Ok(user) => user,
            Err(_) => return Err(AppError::Unauthorized),
        };
        let hash = user.auth_hash.as_deref().ok_or(AppError::Unauthorized)?;
        match verify(&secret, hash) {
            Ok(true) => Ok(user),
            _ => Err(AppError::Unauthorized),
        }
    }

    pub fn check_password(&self, user: &UserModel, password: &str) -> bool {
        verify(password, &user.password_hash).unwrap_or(false)
    }

    pub async fn set_password(&self, user_id: &Uuid, password_hash: String) -> Result<(), AppError> {
        let mut am: UserActive = self.get_user_by_id(user_id).await?.into();
        am.password_hash = Set(password_hash);
        // Force a fresh login after a reset
        am.auth_hash = Set(None);
        am.updated_at = Set(Utc::now());
        Ok(am.update(&self.database_connection).await.map(|_| ())?)
    }

    /// Partial profile update. Gender is normalized to "M"/"F"; anything
    /// unparseable is rejected before any write.
    pub async fn update_profile(
        &self,
        user_id: &Uuid,
        patch: RUpdateProfile,
    ) -> Result<UserModel, AppError> {
        let gender = match patch.gender.as_deref() {
            None => None,
            Some(raw) => Some(Gender::parse(raw).ok_or_else(|| {
                AppError::BadRequest(
                    "Invalid gender value. Must be M, F, Male, or Female".to_string(),
                )
            })?),
        };

        let mut am: UserActive = self.get_user_by_id(user_id).await?.into();
        if let Some(name) = patch.name {
            am.name = Set(name);
        }
        if let Some(designation) = patch.designation {
            am.designation = Set(designation);
        }
        if let Some(department) = patch.department {
            am.department = Set(department);
        }
        if let Some(gender) = gender {
            am.gender = Set(Some(gender.as_str().to_string()));
        }
        if let Some(skills) = patch.skills {
            am.skills = Set(skills);
        }
        if let Some(experience) = patch.experience {
            am.experience = Set(experience);
        }
        am.updated_at = Set(Utc::now());
        Ok(am.update(&self.database_connection).await?)
    }

    /// Everyone except the caller, for roster picking.
    pub async fn list_faculty(&self, excluding: &Uuid) -> Result<Vec<UserModel>, AppError> {
        Ok(User::find()
            .filter(entity::user::Column::Id.ne(*excluding))
            .all(&self.database_connection)
            .await?)
    }

    /// Faculty who could actually be added: no team yet, gender on file.
    pub async fn list_available_faculty(&self, excluding: &Uuid) -> Result<Vec<UserModel>, AppError> {
        Ok(User::find()
            .filter(entity::user::Column::Id.ne(*excluding))
            .filter(entity::user::Column::TeamId.is_null())
            .filter(entity::user::Column::Gender.is_not_null())
            .all(&self.database_connection)
            .await?)
    }

    /// Membership write, usable inside an open transaction.
    pub(crate) async fn set_user_team_on<C: ConnectionTrait>(
        &self,
        conn: &C,
        user_id: Uuid,
        team_id: Option<Uuid>,
    ) -> Result<(), AppError> {
        let user = User::find_by_id(user_id)
            .one(conn)
            .await?
            .ok_or_else(|| DbErr::RecordNotFound("User does not exist".into()))?;
        let mut am: UserActive = user.into();
        am.team_id = Set(team_id);
        am.updated_at = Set(Utc::now());
        am.update(conn).await?;
        Ok(())
    }
}
