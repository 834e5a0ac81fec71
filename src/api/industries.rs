use actix_web::{get, post, web, HttpResponse};
use indexmap::IndexMap;
use sea_orm::{
    ActiveModelTrait, DatabaseBackend, EntityTrait, FromQueryResult, QuerySelect, Set, Statement,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{
    api::helpers::require,
    app_state::AppState,
    database::models::{companies, company_industries, industries},
    errors::ApiError,
};

// --- DTOs (Data Transfer Objects) ---

#[derive(Deserialize, ToSchema, Clone)]
pub struct CreateIndustryDto {
    code: Option<String>,
    industry: Option<String>,
}

#[derive(Deserialize, ToSchema, Clone)]
#[serde(rename_all = "camelCase")]
pub struct AddCompanyDto {
    comp_code: Option<String>,
    ind_code: Option<String>,
}

// --- Response shapes ---

#[derive(Serialize, ToSchema)]
pub struct IndustryResponse {
    pub industry: industries::Model,
}

/// One row per (industry, possibly-null company) pair from the left join.
#[derive(FromQueryResult)]
pub struct IndustryCompanyRow {
    pub industry: String,
    pub company: Option<String>,
}

#[derive(FromQueryResult)]
struct CodeRow {
    code: String,
}

/// Fold joined rows into industry name -> linked company codes, keeping the
/// insertion order of first appearance. An industry with no linked company
/// maps to `["None"]`.
pub fn fold_industry_rows(rows: Vec<IndustryCompanyRow>) -> IndexMap<String, Vec<String>> {
    let mut grouped: IndexMap<String, Vec<String>> = IndexMap::new();
    for row in rows {
        let entry = grouped.entry(row.industry).or_default();
        if let Some(company) = row.company {
            entry.push(company);
        }
    }
    for codes in grouped.values_mut() {
        if codes.is_empty() {
            codes.push("None".to_string());
        }
    }
    grouped
}

// --- Route Handlers ---

#[utoipa::path(
    get,
    path = "/industries",
    tag = "Industries",
    responses(
        (status = 200, description = "Mapping from industry name to linked company codes"),
        (status = 404, description = "No industries exist")
    )
)]
#[get("")]
pub async fn list_industries(data: web::Data<AppState>) -> Result<HttpResponse, ApiError> {
    let rows = IndustryCompanyRow::find_by_statement(Statement::from_string(
        DatabaseBackend::Postgres,
        r#"SELECT i.code, i.industry, c.code AS company
           FROM industries AS i
           LEFT JOIN company_industries AS ci ON ci.ind_code = i.code
           LEFT JOIN companies AS c ON ci.comp_code = c.code"#,
    ))
    .all(&data.db)
    .await?;

    if rows.is_empty() {
        return Err(ApiError::NotFound("No industries found".to_string()));
    }

    Ok(HttpResponse::Ok().json(fold_industry_rows(rows)))
}

#[utoipa::path(
    post,
    path = "/industries",
    tag = "Industries",
    request_body = CreateIndustryDto,
    responses(
        (status = 201, description = "Industry created", body = IndustryResponse),
        (status = 400, description = "Missing code or industry")
    )
)]
#[post("")]
pub async fn create_industry(
    data: web::Data<AppState>,
    dto: web::Json<CreateIndustryDto>,
) -> Result<HttpResponse, ApiError> {
    let code = require(dto.code.as_deref(), "code and industry required")?;
    let industry = require(dto.industry.as_deref(), "code and industry required")?;

    let new_industry = industries::ActiveModel {
        code: Set(code),
        industry: Set(industry),
    };

    let created = new_industry.insert(&data.db).await?;
    Ok(HttpResponse::Created().json(IndustryResponse { industry: created }))
}

#[utoipa::path(
    post,
    path = "/industries/addcompany",
    tag = "Industries",
    request_body = AddCompanyDto,
    responses(
        (status = 201, description = "Company linked to industry", body = company_industries::Model),
        (status = 400, description = "Missing or nonexistent codes")
    )
)]
#[post("/addcompany")]
pub async fn add_company(
    data: web::Data<AppState>,
    dto: web::Json<AddCompanyDto>,
) -> Result<HttpResponse, ApiError> {
    let comp_code = require(dto.comp_code.as_deref(), "code and industry required")?;
    let ind_code = require(dto.ind_code.as_deref(), "code and industry required")?;

    // Both referenced rows must exist; the schema is not relied on for this.
    let company_codes = companies::Entity::find()
        .select_only()
        .column(companies::Column::Code)
        .into_model::<CodeRow>()
        .all(&data.db)
        .await?;
    let industry_codes = industries::Entity::find()
        .select_only()
        .column(industries::Column::Code)
        .into_model::<CodeRow>()
        .all(&data.db)
        .await?;

    let company_exists = company_codes.iter().any(|row| row.code == comp_code);
    let industry_exists = industry_codes.iter().any(|row| row.code == ind_code);
    if !company_exists || !industry_exists {
        return Err(ApiError::BadRequest(
            "Company or industry does not exist".to_string(),
        ));
    }

    let link = company_industries::ActiveModel {
        comp_code: Set(comp_code),
        ind_code: Set(ind_code),
    };

    let created = link.insert(&data.db).await?;
    Ok(HttpResponse::Created().json(created))
}

pub fn init_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/industries")
            .service(list_industries)
            .service(create_industry)
            .service(add_company),
    );
}
