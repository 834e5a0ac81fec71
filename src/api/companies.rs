use actix_web::{delete, get, patch, post, web, HttpResponse};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseBackend, EntityTrait, FromQueryResult, IntoActiveModel,
    QueryFilter, QuerySelect, Set, Statement,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{
    api::helpers::{company_code_from_name, require},
    app_state::AppState,
    database::models::{companies, invoices},
    errors::ApiError,
};

// --- DTOs (Data Transfer Objects) ---

#[derive(Deserialize, ToSchema, Clone)]
pub struct CompanyFieldsDto {
    name: Option<String>,
    description: Option<String>,
}

// --- Response shapes ---

#[derive(FromQueryResult, Serialize, ToSchema)]
pub struct CompanySummary {
    pub code: String,
    pub name: String,
}

#[derive(Serialize, ToSchema)]
pub struct CompanyListResponse {
    pub companies: Vec<CompanySummary>,
}

#[derive(Serialize, ToSchema)]
pub struct CompanyResponse {
    pub company: companies::Model,
}

#[derive(Serialize, ToSchema)]
pub struct CompanyDetailResponse {
    pub company: companies::Model,
    pub invoices: Vec<invoices::Model>,
    pub industries: Vec<String>,
}

#[derive(Serialize, ToSchema)]
pub struct DeletedCompany {
    pub name: String,
    pub code: String,
}

#[derive(Serialize, ToSchema)]
pub struct DeleteCompanyResponse {
    pub msg: String,
    pub company: DeletedCompany,
}

#[derive(FromQueryResult)]
struct IndustryNameRow {
    industry: String,
}

// --- Route Handlers ---

#[utoipa::path(
    get,
    path = "/companies",
    tag = "Companies",
    responses(
        (status = 200, description = "List all companies", body = CompanyListResponse),
        (status = 404, description = "No companies exist")
    )
)]
#[get("")]
pub async fn list_companies(data: web::Data<AppState>) -> Result<HttpResponse, ApiError> {
    let companies = companies::Entity::find()
        .select_only()
        .column(companies::Column::Code)
        .column(companies::Column::Name)
        .into_model::<CompanySummary>()
        .all(&data.db)
        .await?;

    if companies.is_empty() {
        return Err(ApiError::NotFound("No results found".to_string()));
    }

    Ok(HttpResponse::Ok().json(CompanyListResponse { companies }))
}

#[utoipa::path(
    get,
    path = "/companies/{code}",
    tag = "Companies",
    params(
        ("code" = String, Path, description = "Company code")
    ),
    responses(
        (status = 200, description = "Company with its invoices and industries", body = CompanyDetailResponse),
        (status = 404, description = "Company not found")
    )
)]
#[get("/{code}")]
pub async fn get_company(
    data: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let code = path.into_inner();
    let company = companies::Entity::find_by_id(&code)
        .one(&data.db)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("No result found for {}", code)))?;

    let invoices = invoices::Entity::find()
        .filter(invoices::Column::CompCode.eq(&code))
        .all(&data.db)
        .await?;

    // Longstanding quirk kept for compatibility: the industry list spans all
    // companies, not just the requested one.
    let industries = IndustryNameRow::find_by_statement(Statement::from_string(
        DatabaseBackend::Postgres,
        r#"SELECT i.industry
           FROM companies AS c
           JOIN company_industries AS ci ON ci.comp_code = c.code
           JOIN industries AS i ON ci.ind_code = i.code"#,
    ))
    .all(&data.db)
    .await?
    .into_iter()
    .map(|row| row.industry)
    .collect();

    Ok(HttpResponse::Ok().json(CompanyDetailResponse {
        company,
        invoices,
        industries,
    }))
}

#[utoipa::path(
    post,
    path = "/companies",
    tag = "Companies",
    request_body = CompanyFieldsDto,
    responses(
        (status = 201, description = "Company created, code derived from name", body = CompanyResponse),
        (status = 400, description = "Missing name or description")
    )
)]
#[post("")]
pub async fn create_company(
    data: web::Data<AppState>,
    dto: web::Json<CompanyFieldsDto>,
) -> Result<HttpResponse, ApiError> {
    let name = require(dto.name.as_deref(), "Bad request")?;
    let description = require(dto.description.as_deref(), "Bad request")?;

    let company = companies::ActiveModel {
        code: Set(company_code_from_name(&name)),
        name: Set(name),
        description: Set(description),
    };

    let created = company.insert(&data.db).await?;
    Ok(HttpResponse::Created().json(CompanyResponse { company: created }))
}

#[utoipa::path(
    patch,
    path = "/companies/{code}",
    tag = "Companies",
    params(
        ("code" = String, Path, description = "Company code")
    ),
    request_body = CompanyFieldsDto,
    responses(
        (status = 200, description = "Company updated (no-op when fields are unchanged)", body = CompanyResponse),
        (status = 400, description = "Missing name or description"),
        (status = 404, description = "Company not found")
    )
)]
#[patch("/{code}")]
pub async fn update_company(
    data: web::Data<AppState>,
    path: web::Path<String>,
    dto: web::Json<CompanyFieldsDto>,
) -> Result<HttpResponse, ApiError> {
    let name = require(dto.name.as_deref(), "Please provide name and description")?;
    let description = require(
        dto.description.as_deref(),
        "Please provide name and description",
    )?;

    let code = path.into_inner();
    let company = companies::Entity::find_by_id(&code)
        .one(&data.db)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("No result found for {}", code)))?;

    // Skip the write when nothing changed
    if company.name == name && company.description == description {
        return Ok(HttpResponse::Ok().json(CompanyResponse { company }));
    }

    let mut active_model = company.into_active_model();
    active_model.name = Set(name);
    active_model.description = Set(description);

    let updated = active_model.update(&data.db).await?;
    Ok(HttpResponse::Ok().json(CompanyResponse { company: updated }))
}

#[utoipa::path(
    delete,
    path = "/companies/{code}",
    tag = "Companies",
    params(
        ("code" = String, Path, description = "Company code")
    ),
    responses(
        (status = 200, description = "Company deleted", body = DeleteCompanyResponse),
        (status = 404, description = "Company not found")
    )
)]
#[delete("/{code}")]
pub async fn delete_company(
    data: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let code = path.into_inner();
    let company = companies::Entity::find_by_id(&code)
        .one(&data.db)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("No result found for {}", code)))?;

    let deleted = DeletedCompany {
        name: company.name.clone(),
        code: company.code.clone(),
    };
    company.into_active_model().delete(&data.db).await?;

    Ok(HttpResponse::Ok().json(DeleteCompanyResponse {
        msg: "Deleted".to_string(),
        company: deleted,
    }))
}

pub fn init_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/companies")
            .service(list_companies)
            .service(get_company)
            .service(create_company)
            .service(update_company)
            .service(delete_company),
    );
}
