// src/store/profiles.rs

use chrono::Utc;
use sqlx::SqlitePool;

use crate::{
    error::AppError,
    models::profile::{
        AnyProfile, ClientDetails, ClientProfile, ClientProfileRow, DatingDetails, DatingProfile,
        DatingProfileRow, FreelancerDetails, FreelancerProfile, FreelancerProfileRow, Gender,
        Location, ProfileDetails, ProfileKind, encode_list,
    },
    utils::public_id,
};

impl ProfileKind {
    fn table(self) -> &'static str {
        match self {
            ProfileKind::Dating => "dating_profiles",
            ProfileKind::Freelancer => "freelancer_profiles",
            ProfileKind::Client => "client_profiles",
        }
    }
}

fn location_columns(location: Option<&Location>) -> (Option<f64>, Option<f64>, Option<String>) {
    match location {
        Some(Location::Coordinates { latitude, longitude }) => (Some(*latitude), Some(*longitude), None),
        Some(Location::City(city)) => (None, None, Some(city.clone())),
        None => (None, None, None),
    }
}

pub async fn get_dating_profile(pool: &SqlitePool, user_id: i64) -> Result<Option<DatingProfile>, AppError> {
    let row = sqlx::query_as::<_, DatingProfileRow>("SELECT * FROM dating_profiles WHERE user_id = ?1")
        .bind(user_id)
        .fetch_optional(pool)
        .await?;

    row.map(DatingProfile::try_from).transpose()
}

pub async fn get_freelancer_profile(
    pool: &SqlitePool,
    user_id: i64,
) -> Result<Option<FreelancerProfile>, AppError> {
    let row = sqlx::query_as::<_, FreelancerProfileRow>("SELECT * FROM freelancer_profiles WHERE user_id = ?1")
        .bind(user_id)
        .fetch_optional(pool)
        .await?;

    row.map(FreelancerProfile::try_from).transpose()
}

pub async fn get_client_profile(pool: &SqlitePool, user_id: i64) -> Result<Option<ClientProfile>, AppError> {
    let row = sqlx::query_as::<_, ClientProfileRow>("SELECT * FROM client_profiles WHERE user_id = ?1")
        .bind(user_id)
        .fetch_optional(pool)
        .await?;

    row.map(ClientProfile::try_from).transpose()
}

pub async fn get_profile(pool: &SqlitePool, kind: ProfileKind, user_id: i64) -> Result<Option<AnyProfile>, AppError> {
    Ok(match kind {
        ProfileKind::Dating => get_dating_profile(pool, user_id).await?.map(AnyProfile::from),
        ProfileKind::Freelancer => get_freelancer_profile(pool, user_id).await?.map(AnyProfile::from),
        ProfileKind::Client => get_client_profile(pool, user_id).await?.map(AnyProfile::from),
    })
}

/// Looks a profile up by its public identifier; the prefix selects the table.
pub async fn get_profile_by_public_id(pool: &SqlitePool, public_id: &str) -> Result<Option<AnyProfile>, AppError> {
    let Some(kind) = public_id::kind_of(public_id) else {
        return Ok(None);
    };

    let user_id = sqlx::query_scalar::<_, i64>(&format!(
        "SELECT user_id FROM {} WHERE public_id = ?1",
        kind.table()
    ))
    .bind(public_id)
    .fetch_optional(pool)
    .await?;

    match user_id {
        Some(user_id) => get_profile(pool, kind, user_id).await,
        None => Ok(None),
    }
}

/// Kinds of profile the user currently owns, in menu order.
pub async fn existing_kinds(pool: &SqlitePool, user_id: i64) -> Result<Vec<ProfileKind>, AppError> {
    let mut kinds = Vec::new();
    for kind in ProfileKind::ALL {
        let exists = sqlx::query_scalar::<_, bool>(&format!(
            "SELECT EXISTS(SELECT 1 FROM {} WHERE user_id = ?1)",
            kind.table()
        ))
        .bind(user_id)
        .fetch_one(pool)
        .await?;
        if exists {
            kinds.push(kind);
        }
    }
    Ok(kinds)
}

/// Inserts the user's dating profile, or overwrites every field of the existing one.
///
/// A public identifier is generated only on first creation; an overwrite keeps it
/// and refreshes `updated_at`.
pub async fn save_dating_profile(
    pool: &SqlitePool,
    user_id: i64,
    details: &DatingDetails,
) -> Result<DatingProfile, AppError> {
    let (latitude, longitude, city) = location_columns(details.location.as_ref());
    let photos = encode_list(&details.photos)?;
    let now = Utc::now();

    let mut tx = pool.begin().await?;

    let existing = sqlx::query_scalar::<_, i64>("SELECT profile_id FROM dating_profiles WHERE user_id = ?1")
        .bind(user_id)
        .fetch_optional(&mut *tx)
        .await?;

    let row = match existing {
        Some(profile_id) => {
            sqlx::query_as::<_, DatingProfileRow>(
                r#"
                UPDATE dating_profiles
                SET name = ?1, gender = ?2, age = ?3, country = ?4, custom_country = ?5,
                    bio = ?6, latitude = ?7, longitude = ?8, city = ?9, photo_file_ids = ?10,
                    updated_at = ?11
                WHERE profile_id = ?12
                RETURNING *
                "#,
            )
            .bind(&details.name)
            .bind(details.gender.as_str())
            .bind(i64::from(details.age))
            .bind(&details.country)
            .bind(&details.custom_country)
            .bind(&details.bio)
            .bind(latitude)
            .bind(longitude)
            .bind(&city)
            .bind(&photos)
            .bind(now)
            .bind(profile_id)
            .fetch_one(&mut *tx)
            .await?
        }
        None => {
            sqlx::query_as::<_, DatingProfileRow>(
                r#"
                INSERT INTO dating_profiles (
                    user_id, public_id, name, gender, age, country, custom_country,
                    bio, latitude, longitude, city, photo_file_ids, created_at
                )
                VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13)
                RETURNING *
                "#,
            )
            .bind(user_id)
            .bind(public_id::generate(ProfileKind::Dating))
            .bind(&details.name)
            .bind(details.gender.as_str())
            .bind(i64::from(details.age))
            .bind(&details.country)
            .bind(&details.custom_country)
            .bind(&details.bio)
            .bind(latitude)
            .bind(longitude)
            .bind(&city)
            .bind(&photos)
            .bind(now)
            .fetch_one(&mut *tx)
            .await?
        }
    };

    tx.commit().await?;

    let profile = DatingProfile::try_from(row)?;
    tracing::info!(
        "Saved dating profile for user {} ({})",
        user_id,
        profile.public_id
    );
    Ok(profile)
}

pub async fn save_freelancer_profile(
    pool: &SqlitePool,
    user_id: i64,
    details: &FreelancerDetails,
) -> Result<FreelancerProfile, AppError> {
    let categories = encode_list(&details.categories)?;
    let photos = encode_list(&details.photos)?;
    let age = details.age.map(i64::from);
    let now = Utc::now();

    let mut tx = pool.begin().await?;

    let existing = sqlx::query_scalar::<_, i64>("SELECT profile_id FROM freelancer_profiles WHERE user_id = ?1")
        .bind(user_id)
        .fetch_optional(&mut *tx)
        .await?;

    let row = match existing {
        Some(profile_id) => {
            sqlx::query_as::<_, FreelancerProfileRow>(
                r#"
                UPDATE freelancer_profiles
                SET name = ?1, age = ?2, country = ?3, custom_country = ?4, categories = ?5,
                    skills_portfolio = ?6, rate = ?7, experience = ?8, photo_file_ids = ?9,
                    updated_at = ?10
                WHERE profile_id = ?11
                RETURNING *
                "#,
            )
            .bind(&details.name)
            .bind(age)
            .bind(&details.country)
            .bind(&details.custom_country)
            .bind(&categories)
            .bind(&details.skills_portfolio)
            .bind(&details.rate)
            .bind(details.experience.as_str())
            .bind(&photos)
            .bind(now)
            .bind(profile_id)
            .fetch_one(&mut *tx)
            .await?
        }
        None => {
            sqlx::query_as::<_, FreelancerProfileRow>(
                r#"
                INSERT INTO freelancer_profiles (
                    user_id, public_id, name, age, country, custom_country, categories,
                    skills_portfolio, rate, experience, photo_file_ids, created_at
                )
                VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)
                RETURNING *
                "#,
            )
            .bind(user_id)
            .bind(public_id::generate(ProfileKind::Freelancer))
            .bind(&details.name)
            .bind(age)
            .bind(&details.country)
            .bind(&details.custom_country)
            .bind(&categories)
            .bind(&details.skills_portfolio)
            .bind(&details.rate)
            .bind(details.experience.as_str())
            .bind(&photos)
            .bind(now)
            .fetch_one(&mut *tx)
            .await?
        }
    };

    tx.commit().await?;

    let profile = FreelancerProfile::try_from(row)?;
    tracing::info!(
        "Saved freelancer profile for user {} ({})",
        user_id,
        profile.public_id
    );
    Ok(profile)
}

pub async fn save_client_profile(
    pool: &SqlitePool,
    user_id: i64,
    details: &ClientDetails,
) -> Result<ClientProfile, AppError> {
    let categories = encode_list(&details.required_categories)?;
    let now = Utc::now();

    let mut tx = pool.begin().await?;

    let existing = sqlx::query_scalar::<_, i64>("SELECT profile_id FROM client_profiles WHERE user_id = ?1")
        .bind(user_id)
        .fetch_optional(&mut *tx)
        .await?;

    let row = match existing {
        Some(profile_id) => {
            sqlx::query_as::<_, ClientProfileRow>(
                r#"
                UPDATE client_profiles
                SET name_company = ?1, country = ?2, custom_country = ?3, project_details = ?4,
                    budget = ?5, timeline = ?6, required_categories = ?7, updated_at = ?8
                WHERE profile_id = ?9
                RETURNING *
                "#,
            )
            .bind(&details.name_company)
            .bind(&details.country)
            .bind(&details.custom_country)
            .bind(&details.project_details)
            .bind(&details.budget)
            .bind(&details.timeline)
            .bind(&categories)
            .bind(now)
            .bind(profile_id)
            .fetch_one(&mut *tx)
            .await?
        }
        None => {
            sqlx::query_as::<_, ClientProfileRow>(
                r#"
                INSERT INTO client_profiles (
                    user_id, public_id, name_company, country, custom_country,
                    project_details, budget, timeline, required_categories, created_at
                )
                VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)
                RETURNING *
                "#,
            )
            .bind(user_id)
            .bind(public_id::generate(ProfileKind::Client))
            .bind(&details.name_company)
            .bind(&details.country)
            .bind(&details.custom_country)
            .bind(&details.project_details)
            .bind(&details.budget)
            .bind(&details.timeline)
            .bind(&categories)
            .bind(now)
            .fetch_one(&mut *tx)
            .await?
        }
    };

    tx.commit().await?;

    let profile = ClientProfile::try_from(row)?;
    tracing::info!(
        "Saved client profile for user {} ({})",
        user_id,
        profile.public_id
    );
    Ok(profile)
}

/// Saves any kind of profile; see `save_dating_profile` for the upsert rules.
pub async fn save_profile(
    pool: &SqlitePool,
    user_id: i64,
    details: &ProfileDetails,
) -> Result<AnyProfile, AppError> {
    Ok(match details {
        ProfileDetails::Dating(d) => save_dating_profile(pool, user_id, d).await?.into(),
        ProfileDetails::Freelancer(d) => save_freelancer_profile(pool, user_id, d).await?.into(),
        ProfileDetails::Client(d) => save_client_profile(pool, user_id, d).await?.into(),
    })
}

/// Deletes the user's profile of `kind`. Returns false when there was none.
pub async fn delete_profile(pool: &SqlitePool, user_id: i64, kind: ProfileKind) -> Result<bool, AppError> {
    let mut tx = pool.begin().await?;
    let result = sqlx::query(&format!("DELETE FROM {} WHERE user_id = ?1", kind.table()))
        .bind(user_id)
        .execute(&mut *tx)
        .await?;
    tx.commit().await?;

    let deleted = result.rows_affected() > 0;
    if deleted {
        tracing::info!("Deleted {} profile for user {}", kind, user_id);
    }
    Ok(deleted)
}

/// Next dating profile to show `viewer_id`, after `after_profile_id` in id order.
///
/// Skips the viewer's own profile, profiles of banned users and users the viewer
/// already sent a like to. `gender` of `None` means any.
pub async fn next_dating_candidate(
    pool: &SqlitePool,
    viewer_id: i64,
    gender: Option<Gender>,
    after_profile_id: i64,
) -> Result<Option<DatingProfile>, AppError> {
    let row = sqlx::query_as::<_, DatingProfileRow>(
        r#"
        SELECT dp.*
        FROM dating_profiles dp
        JOIN users u ON u.telegram_id = dp.user_id
        WHERE dp.user_id <> ?1
          AND u.is_banned = 0
          AND dp.profile_id > ?2
          AND (?3 IS NULL OR dp.gender = ?3)
          AND NOT EXISTS (
              SELECT 1 FROM dating_likes l
              WHERE l.liker_user_id = ?1 AND l.liked_user_id = dp.user_id
          )
        ORDER BY dp.profile_id ASC
        LIMIT 1
        "#,
    )
    .bind(viewer_id)
    .bind(after_profile_id)
    .bind(gender.map(Gender::as_str))
    .fetch_optional(pool)
    .await?;

    row.map(DatingProfile::try_from).transpose()
}
