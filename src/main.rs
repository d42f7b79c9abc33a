#[macro_use]
extern crate rocket;

mod auth;
mod config;
mod db;
mod error;
mod mail;
mod models;
mod money;
mod payload;
mod pdf;
mod period;
mod report;
mod summary;
mod trend;

use std::sync::Once;

use chrono::{DateTime, Local, NaiveDate, Utc};
use config::AppConfig;
use db::DbPool;
use error::{ApiError, ApiResult};
use mail::Mailer;
use models::{Category, Expense, PaymentMode, Profile, ProfileUpdate, User};
use money::{format_money, parse_amount_to_cents};
use payload::{ExpenseRequest, DEFAULT_TITLE};
use period::Period;
use rocket::fairing::{self, AdHoc};
use rocket::figment::Figment;
use rocket::form::Form;
use rocket::fs::{FileServer, TempFile};
use rocket::http::{ContentType, Header, Status};
use rocket::response::status::Custom;
use rocket::serde::json::{json, Json, Value};
use rocket::tokio::io::AsyncReadExt;
use rocket::{Build, Request, Rocket, State};
use serde::{Deserialize, Serialize};
use summary::{CategoryTotal, PaymentModeTotal, PeriodSummary};
use tracing::{error, info, warn};
use uuid::Uuid;

const DEFAULT_PROFILE_IMAGE: &str = "/media/profile_images/default.png";

#[derive(Deserialize)]
struct SignupRequest {
    #[serde(rename = "FullName")]
    full_name: String,
    #[serde(rename = "Email")]
    email: String,
    #[serde(rename = "Password")]
    password: String,
}

#[derive(Deserialize)]
struct LoginRequest {
    #[serde(rename = "Email")]
    email: String,
    #[serde(rename = "Password")]
    password: String,
}

#[derive(Deserialize)]
struct ForgotPasswordRequest {
    email: String,
}

#[derive(Deserialize)]
struct ResetPasswordRequest {
    #[serde(rename = "Email")]
    email: String,
    otp: String,
    #[serde(rename = "Password")]
    password: String,
}

#[derive(FromForm)]
struct ProfileForm<'r> {
    #[field(name = "userId")]
    user_id: Option<i64>,
    #[field(name = "FullName")]
    full_name: Option<String>,
    #[field(name = "Email")]
    email: Option<String>,
    bio: Option<String>,
    currency: Option<String>,
    monthly_income: Option<String>,
    phone_number: Option<String>,
    monthly_budget: Option<String>,
    savings_goal: Option<String>,
    profile_image: Option<TempFile<'r>>,
}

#[derive(FromForm)]
struct BulkUploadForm<'r> {
    #[field(name = "userId")]
    user_id: Option<i64>,
    file: Option<TempFile<'r>>,
}

#[derive(Serialize)]
struct UserView {
    id: i64,
    #[serde(rename = "FullName")]
    full_name: String,
    #[serde(rename = "Email")]
    email: String,
    #[serde(rename = "RegDate")]
    reg_date: DateTime<Utc>,
}

#[derive(Serialize)]
struct CategoryRefView {
    id: i64,
    name: String,
}

#[derive(Serialize)]
struct ExpenseView {
    id: i64,
    user: i64,
    title: String,
    amount: String,
    category: Option<CategoryRefView>,
    payment_mode: PaymentMode,
    note: String,
    expense_date: NaiveDate,
    created_at: DateTime<Utc>,
}

#[derive(Serialize)]
struct ProfileView {
    id: i64,
    #[serde(rename = "FullName")]
    full_name: String,
    #[serde(rename = "Email")]
    email: String,
    bio: Option<String>,
    currency: String,
    monthly_income: String,
    phone_number: Option<String>,
    monthly_budget: String,
    savings_goal: String,
    profile_image: Option<String>,
}

#[derive(Serialize)]
struct CategoryTotalView {
    category_name: Option<String>,
    total: String,
}

#[derive(Serialize)]
struct PaymentModeView {
    mode: PaymentMode,
    total: String,
    count: usize,
}

#[derive(Responder)]
struct PdfDownload {
    bytes: Vec<u8>,
    content_type: ContentType,
    disposition: Header<'static>,
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

fn user_view(user: User) -> UserView {
    UserView {
        id: user.id,
        full_name: user.full_name,
        email: user.email,
        reg_date: user.reg_date,
    }
}

fn expense_view(expense: Expense) -> ExpenseView {
    let category = match (expense.category_id, expense.category_name) {
        (Some(id), Some(name)) => Some(CategoryRefView { id, name }),
        _ => None,
    };
    ExpenseView {
        id: expense.id,
        user: expense.user_id,
        title: expense.title,
        amount: format_money(expense.amount_cents),
        category,
        payment_mode: expense.payment_mode,
        note: expense.note,
        expense_date: expense.expense_date,
        created_at: expense.created_at,
    }
}

fn profile_view(profile: Profile) -> ProfileView {
    ProfileView {
        id: profile.id,
        full_name: profile.full_name,
        email: profile.email,
        bio: profile.bio,
        currency: profile.currency,
        monthly_income: format_money(profile.monthly_income_cents),
        phone_number: profile.phone_number,
        monthly_budget: format_money(profile.monthly_budget_cents),
        savings_goal: format_money(profile.savings_goal_cents),
        profile_image: profile.profile_image,
    }
}

fn profile_image_url(profile: &Profile) -> String {
    match &profile.profile_image {
        Some(name) => format!("/media/profile_images/{name}"),
        None => DEFAULT_PROFILE_IMAGE.to_string(),
    }
}

fn category_total_view(total: CategoryTotal) -> CategoryTotalView {
    CategoryTotalView {
        category_name: total.category_name,
        total: format_money(total.total_cents),
    }
}

fn payment_mode_view(total: PaymentModeTotal) -> PaymentModeView {
    PaymentModeView {
        mode: total.mode,
        total: format_money(total.total_cents),
        count: total.count,
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn optional_amount(field: &str, value: Option<String>) -> ApiResult<Option<i64>> {
    non_blank(value)
        .map(|value| {
            parse_amount_to_cents(&value)
                .map_err(|err| ApiError::Validation(format!("{field}: {err}")))
        })
        .transpose()
}

fn image_extension(content_type: Option<&ContentType>) -> Option<&'static str> {
    let content_type = content_type?;
    if content_type.is_png() {
        Some("png")
    } else if content_type.is_jpeg() {
        Some("jpg")
    } else if content_type.is_webp() {
        Some("webp")
    } else if content_type.is_gif() {
        Some("gif")
    } else {
        None
    }
}

fn remove_profile_image(config: &AppConfig, file_name: &str) {
    let path = config.profile_images_dir().join(file_name);
    if let Err(err) = std::fs::remove_file(&path) {
        if err.kind() != std::io::ErrorKind::NotFound {
            warn!(path = %path.display(), error = %err, "could not remove profile image");
        }
    }
}

async fn read_upload(file: &TempFile<'_>) -> std::io::Result<Vec<u8>> {
    let mut reader = Box::pin(file.open().await?);
    let mut bytes = Vec::new();
    reader.read_to_end(&mut bytes).await?;
    Ok(bytes)
}

/// The `category_id` query wins over the path segment, which may hold
/// either a numeric id or a category name. A numeric segment that is not an
/// id is tried as a name.
fn report_category(
    conn: &rusqlite::Connection,
    segment: Option<&str>,
    category_id: Option<i64>,
) -> ApiResult<Option<Category>> {
    let found = match (category_id, segment.map(str::trim)) {
        (Some(id), _) => db::category_by_id(conn, id)?,
        (None, Some(raw)) => match raw.parse::<i64>() {
            Ok(id) => match db::category_by_id(conn, id)? {
                Some(category) => Some(category),
                None => db::category_by_name(conn, raw)?,
            },
            Err(_) => db::category_by_name(conn, raw)?,
        },
        (None, None) => return Ok(None),
    };
    found
        .map(Some)
        .ok_or_else(|| ApiError::NotFound("Category not found".to_string()))
}

fn file_safe(name: &str) -> String {
    name.chars()
        .map(|ch| if ch.is_ascii_alphanumeric() { ch } else { '_' })
        .collect()
}

#[post("/signup", data = "<body>")]
fn signup(pool: &State<DbPool>, body: Json<SignupRequest>) -> ApiResult<Custom<Json<Value>>> {
    let body = body.into_inner();
    let full_name = body.full_name.trim();
    let email = body.email.trim();
    if full_name.is_empty() || email.is_empty() || body.password.is_empty() {
        return Err(ApiError::Validation(
            "FullName, Email and Password are required".to_string(),
        ));
    }

    let conn = pool.get()?;
    if db::email_exists(&conn, email)? {
        return Err(ApiError::Validation("Email already exists".to_string()));
    }
    let password_hash = auth::hash_password(&body.password)?;
    let user_id = db::insert_user(&conn, full_name, email, &password_hash, Utc::now())?;
    let user = db::user_by_id(&conn, user_id)?.ok_or_else(ApiError::user_not_found)?;
    info!(user_id, "user registered");

    Ok(Custom(
        Status::Created,
        Json(json!({
            "message": "User registered successfully",
            "user": user_view(user),
        })),
    ))
}

#[post("/login", data = "<body>")]
fn login(pool: &State<DbPool>, body: Json<LoginRequest>) -> ApiResult<Json<Value>> {
    let body = body.into_inner();
    let conn = pool.get()?;
    let creds = db::user_credentials(&conn, body.email.trim())?;
    let Some((user, _)) = creds.filter(|(_, hash)| auth::verify_password(hash, &body.password))
    else {
        warn!("rejected login attempt");
        return Err(ApiError::AuthFailure("Invalid credentials".to_string()));
    };

    Ok(Json(json!({
        "message": "Login Successful",
        "userId": user.id,
        "username": user.full_name,
    })))
}

fn save_expense(pool: &DbPool, request: ExpenseRequest) -> ApiResult<Json<Value>> {
    let ExpenseRequest {
        user_id,
        expense_id,
        fields,
    } = request;
    let conn = pool.get()?;
    if db::user_by_id(&conn, user_id)?.is_none() {
        return Err(ApiError::user_not_found());
    }
    let input = fields.into_input(DEFAULT_TITLE, today())?;
    let expense = db::upsert_expense(&conn, user_id, expense_id, &input, Utc::now())?
        .ok_or_else(|| ApiError::NotFound("Expense not found".to_string()))?;

    let message = if expense_id.is_some() {
        "Expense updated successfully!"
    } else {
        "Expense added successfully!"
    };
    info!(user_id, expense_id = expense.id, "expense saved");
    Ok(Json(json!({
        "message": message,
        "expense": expense_view(expense),
    })))
}

#[post("/expense", data = "<body>")]
fn upsert_expense(pool: &State<DbPool>, body: Json<ExpenseRequest>) -> ApiResult<Json<Value>> {
    save_expense(pool, body.into_inner())
}

#[post("/editexpense", data = "<body>")]
fn edit_expense(pool: &State<DbPool>, body: Json<ExpenseRequest>) -> ApiResult<Json<Value>> {
    save_expense(pool, body.into_inner())
}

#[get("/getexpense/<user_id>")]
fn get_expenses(pool: &State<DbPool>, user_id: i64) -> ApiResult<Json<Value>> {
    let conn = pool.get()?;
    if db::user_by_id(&conn, user_id)?.is_none() {
        return Err(ApiError::user_not_found());
    }
    let expenses = db::list_expenses(&conn, user_id)?
        .into_iter()
        .map(expense_view)
        .collect::<Vec<_>>();
    Ok(Json(json!({ "success": true, "expenses": expenses })))
}

#[get("/categories")]
fn categories(pool: &State<DbPool>) -> ApiResult<Json<Value>> {
    let conn = pool.get()?;
    let list = db::list_categories(&conn)?;
    Ok(Json(json!({ "success": true, "categories": list })))
}

#[post("/forgetpassword", data = "<body>")]
fn forget_password(
    pool: &State<DbPool>,
    config: &State<AppConfig>,
    mailer: &State<Box<dyn Mailer>>,
    body: Json<ForgotPasswordRequest>,
) -> ApiResult<Json<Value>> {
    let email = body.email.trim();
    let conn = pool.get()?;
    let Some((user, _)) = db::user_credentials(&conn, email)? else {
        return Err(ApiError::Unauthorized("user not found".to_string()));
    };

    let otp = auth::generate_otp();
    db::store_otp(&conn, user.id, &otp, Utc::now())?;
    drop(conn);

    let mail = mail::password_reset_mail(
        &config.mail_from,
        &user.email,
        &user.full_name,
        &otp,
        config.otp_ttl_minutes,
    );
    if let Err(err) = mailer.send(&mail) {
        error!(user_id = user.id, error = %err, "password reset mail not sent");
        return Err(err.into());
    }
    info!(user_id = user.id, "password reset code issued");

    Ok(Json(json!({
        "success": true,
        "message": "otp sent to mail successfully",
    })))
}

#[post("/reset", data = "<body>")]
fn reset_password(
    pool: &State<DbPool>,
    config: &State<AppConfig>,
    body: Json<ResetPasswordRequest>,
) -> ApiResult<Json<Value>> {
    let body = body.into_inner();
    let conn = pool.get()?;
    let state = db::otp_state(&conn, body.email.trim())?
        .ok_or_else(|| ApiError::NotFound("User not found.".to_string()))?;

    if let Err(err) = auth::verify_otp(
        state.otp.as_deref(),
        state.otp_created_at,
        &body.otp,
        Utc::now(),
        config.otp_ttl()?,
    ) {
        warn!(user_id = state.user_id, reason = %err, "password reset rejected");
        return Err(err.into());
    }
    if body.password.is_empty() {
        return Err(ApiError::Validation("Password is required".to_string()));
    }

    let password_hash = auth::hash_password(&body.password)?;
    db::reset_password(&conn, state.user_id, &password_hash)?;
    info!(user_id = state.user_id, "password reset");

    Ok(Json(json!({
        "success": true,
        "message": "Password reset successful.",
    })))
}

fn store_profile(
    pool: &DbPool,
    user_id: i64,
    update: &ProfileUpdate,
    image: Option<&str>,
) -> ApiResult<()> {
    let mut conn = pool.get()?;
    let tx = conn.transaction()?;
    db::update_profile(&tx, user_id, update)?;
    if let Some(file_name) = image {
        db::set_profile_image(&tx, user_id, file_name)?;
    }
    tx.commit()?;
    Ok(())
}

#[post("/editprofile", data = "<form>")]
async fn edit_profile(
    pool: &State<DbPool>,
    config: &State<AppConfig>,
    form: Form<ProfileForm<'_>>,
) -> ApiResult<Json<Value>> {
    let mut form = form.into_inner();
    let user_id = form
        .user_id
        .ok_or_else(|| ApiError::Validation("User ID is required".to_string()))?;

    let update = ProfileUpdate {
        full_name: non_blank(form.full_name.take()),
        email: non_blank(form.email.take()),
        bio: form.bio.take(),
        currency: non_blank(form.currency.take()),
        monthly_income_cents: optional_amount("monthly_income", form.monthly_income.take())?,
        phone_number: non_blank(form.phone_number.take()),
        monthly_budget_cents: optional_amount("monthly_budget", form.monthly_budget.take())?,
        savings_goal_cents: optional_amount("savings_goal", form.savings_goal.take())?,
    };

    let image = form.profile_image.take().filter(|image| image.len() > 0);
    let image_ext = match &image {
        Some(image) => Some(
            image_extension(image.content_type())
                .ok_or_else(|| ApiError::Validation("Unsupported image type".to_string()))?,
        ),
        None => None,
    };

    let previous_image = {
        let conn = pool.get()?;
        let profile = db::profile_by_id(&conn, user_id)?.ok_or_else(ApiError::user_not_found)?;
        if let Some(email) = &update.email {
            if *email != profile.email && db::email_exists(&conn, email)? {
                return Err(ApiError::Validation("Email already exists".to_string()));
            }
        }
        profile.profile_image
    };

    // The new image is written first; the row only changes once it is in place.
    let new_image = match (image, image_ext) {
        (Some(mut image), Some(ext)) => {
            let file_name = format!("user-{user_id}-{}.{ext}", Uuid::new_v4());
            image
                .copy_to(config.profile_images_dir().join(&file_name))
                .await?;
            Some(file_name)
        }
        _ => None,
    };

    if let Err(err) = store_profile(pool, user_id, &update, new_image.as_deref()) {
        if let Some(file_name) = &new_image {
            remove_profile_image(config, file_name);
        }
        return Err(err);
    }
    if let (Some(_), Some(previous)) = (&new_image, previous_image) {
        remove_profile_image(config, &previous);
    }

    let conn = pool.get()?;
    let profile = db::profile_by_id(&conn, user_id)?.ok_or_else(ApiError::user_not_found)?;
    info!(user_id, "profile updated");
    let image_url = profile_image_url(&profile);
    Ok(Json(json!({
        "success": true,
        "message": "Profile updated successfully!",
        "data": profile_view(profile),
        "profile_image_url": image_url,
    })))
}

#[get("/viewprofile/<user_id>")]
fn view_profile(pool: &State<DbPool>, user_id: i64) -> ApiResult<Json<Value>> {
    let conn = pool.get()?;
    let profile = db::profile_by_id(&conn, user_id)?.ok_or_else(ApiError::user_not_found)?;
    let image_url = profile_image_url(&profile);
    Ok(Json(json!({
        "success": true,
        "profile": profile_view(profile),
        "profile_image_url": image_url,
    })))
}

#[post("/bulkexpense", data = "<form>")]
async fn bulk_expense(
    pool: &State<DbPool>,
    form: Form<BulkUploadForm<'_>>,
) -> ApiResult<Custom<Json<Value>>> {
    let form = form.into_inner();
    let file = form
        .file
        .ok_or_else(|| ApiError::Validation("No file uploaded".to_string()))?;
    let user_id = form
        .user_id
        .ok_or_else(|| ApiError::Validation("User ID required".to_string()))?;

    let bytes = read_upload(&file).await?;
    let inputs = payload::parse_bulk(&bytes, today())?;

    let mut conn = pool.get()?;
    if db::user_by_id(&conn, user_id)?.is_none() {
        return Err(ApiError::user_not_found());
    }
    let tx = conn.transaction()?;
    let now = Utc::now();
    for input in &inputs {
        db::insert_expense(&tx, user_id, input, now)?;
    }
    tx.commit()?;
    info!(user_id, count = inputs.len(), "bulk upload stored");

    Ok(Custom(
        Status::Created,
        Json(json!({
            "success": true,
            "message": format!("{} expenses uploaded successfully!", inputs.len()),
        })),
    ))
}

#[get("/summary/<user_id>")]
fn expense_summary(pool: &State<DbPool>, user_id: i64) -> ApiResult<Json<Value>> {
    let conn = pool.get()?;
    if db::user_by_id(&conn, user_id)?.is_none() {
        return Err(ApiError::user_not_found());
    }
    let expenses = db::list_expenses(&conn, user_id)?;
    drop(conn);

    let mut totals = serde_json::Map::new();
    let mut by_category = serde_json::Map::new();
    let mut by_payment_mode = serde_json::Map::new();
    for PeriodSummary { period, summary } in summary::summarize_periods(&expenses, today()) {
        let total_key = match period {
            Period::Overall => "total",
            other => other.key(),
        };
        totals.insert(total_key.to_string(), json!(format_money(summary.total_cents)));
        let categories = summary
            .by_category
            .into_iter()
            .map(category_total_view)
            .collect::<Vec<_>>();
        by_category.insert(period.key().to_string(), json!(categories));
        let modes = summary
            .by_payment_mode
            .into_iter()
            .map(payment_mode_view)
            .collect::<Vec<_>>();
        by_payment_mode.insert(period.key().to_string(), json!(modes));
    }

    Ok(Json(json!({
        "success": true,
        "summary": totals,
        "by_category": by_category,
        "by_payment_mode": by_payment_mode,
    })))
}

fn report_download(
    pool: &DbPool,
    user_id: i64,
    category: Option<&str>,
    category_id: Option<i64>,
) -> ApiResult<PdfDownload> {
    let conn = pool.get()?;
    let user = db::user_by_id(&conn, user_id)?.ok_or_else(ApiError::user_not_found)?;
    let category = report_category(&conn, category, category_id)?;
    let expenses = db::list_expenses(&conn, user_id)?;
    drop(conn);

    let report = report::build_report(&user, &expenses, category.as_ref())?;
    let rendered = pdf::render(&report)?;
    info!(user_id, pages = rendered.pages, "expense report generated");

    Ok(PdfDownload {
        bytes: rendered.bytes,
        content_type: ContentType::PDF,
        disposition: Header::new(
            "Content-Disposition",
            format!(
                "attachment; filename=\"Expense_Report_{}.pdf\"",
                file_safe(&user.full_name)
            ),
        ),
    })
}

#[get("/download-expense-report/<user_id>?<category_id>")]
fn download_report(
    pool: &State<DbPool>,
    user_id: i64,
    category_id: Option<i64>,
) -> ApiResult<PdfDownload> {
    report_download(pool, user_id, None, category_id)
}

#[get("/download-expense-report/<user_id>/<category>?<category_id>")]
fn download_category_report(
    pool: &State<DbPool>,
    user_id: i64,
    category: &str,
    category_id: Option<i64>,
) -> ApiResult<PdfDownload> {
    report_download(pool, user_id, Some(category), category_id)
}

#[delete("/deleteuser/<user_id>")]
fn delete_user(
    pool: &State<DbPool>,
    config: &State<AppConfig>,
    user_id: i64,
) -> ApiResult<Json<Value>> {
    let conn = pool.get()?;
    let image = db::profile_by_id(&conn, user_id)?.and_then(|profile| profile.profile_image);
    if !db::delete_user(&conn, user_id)? {
        return Err(ApiError::NotFound("User not found!".to_string()));
    }
    if let Some(image) = image {
        remove_profile_image(config, &image);
    }
    info!(user_id, "user deleted");
    Ok(Json(json!({
        "success": true,
        "message": "User deleted successfully!",
    })))
}

#[delete("/api/deleteexpense/<id>")]
fn delete_expense(pool: &State<DbPool>, id: i64) -> ApiResult<Json<Value>> {
    let conn = pool.get()?;
    if !db::delete_expense(&conn, id)? {
        return Err(ApiError::NotFound("Expense not found.".to_string()));
    }
    info!(expense_id = id, "expense deleted");
    Ok(Json(json!({ "message": "Expense deleted successfully!" })))
}

#[catch(default)]
fn default_catcher(status: Status, _req: &Request<'_>) -> (Status, Json<Value>) {
    let message = status.reason().unwrap_or("Request failed");
    (status, Json(json!({ "success": false, "message": message })))
}

/// Validates the configuration, picks the mail transport, creates the data
/// directories, opens and migrates the database and seeds the default
/// categories before the server starts.
async fn prepare_storage(rocket: Rocket<Build>) -> fairing::Result {
    let Some(config) = rocket.state::<AppConfig>().cloned() else {
        error!("application configuration missing");
        return Err(rocket);
    };
    if let Err(err) = config.validate() {
        error!(error = %err, "invalid configuration");
        return Err(rocket);
    }
    let mailer = match mail::mailer_for(&config) {
        Ok(mailer) => mailer,
        Err(err) => {
            error!(error = %err, "mail transport setup failed");
            return Err(rocket);
        }
    };
    let rocket = rocket.manage(mailer);

    let mut dirs = vec![config.profile_images_dir()];
    if let Some(parent) = config.database_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        dirs.push(parent.to_path_buf());
    }
    for dir in &dirs {
        if let Err(err) = std::fs::create_dir_all(dir) {
            error!(dir = %dir.display(), error = %err, "cannot create data directory");
            return Err(rocket);
        }
    }

    match db::init_db(&config.database_path) {
        Ok(pool) => {
            info!(path = %config.database_path.display(), "database ready");
            Ok(rocket
                .manage(pool)
                .mount("/media", FileServer::from(&config.media_dir)))
        }
        Err(err) => {
            error!(path = %config.database_path.display(), error = %err, "database setup failed");
            Err(rocket)
        }
    }
}

fn init_tracing() {
    static TRACING_INIT: Once = Once::new();
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, EnvFilter};

        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("expense_tracker=info"));
        let _ = fmt().with_env_filter(filter).try_init();
    });
}

fn build(figment: Figment) -> Rocket<Build> {
    rocket::custom(figment)
        .attach(AdHoc::config::<AppConfig>())
        .attach(AdHoc::try_on_ignite("Storage", prepare_storage))
        .mount(
            "/",
            routes![
                signup,
                login,
                upsert_expense,
                edit_expense,
                get_expenses,
                categories,
                forget_password,
                reset_password,
                edit_profile,
                view_profile,
                bulk_expense,
                expense_summary,
                download_report,
                download_category_report,
                delete_user,
                delete_expense
            ],
        )
        .register("/", catchers![default_catcher])
}

#[launch]
fn rocket() -> _ {
    init_tracing();
    build(rocket::Config::figment())
}
