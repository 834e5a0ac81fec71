use actix_web::{delete, get, patch, post, web, HttpResponse};
use sea_orm::{
    ActiveModelTrait, DatabaseBackend, EntityTrait, FromQueryResult, IntoActiveModel, NotSet,
    QuerySelect, Set, Statement,
};
use sea_orm::prelude::Date;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{
    api::helpers::{require, require_amount},
    app_state::AppState,
    database::models::invoices,
    errors::ApiError,
};

// --- DTOs (Data Transfer Objects) ---

#[derive(Deserialize, ToSchema, Clone)]
pub struct CreateInvoiceDto {
    comp_code: Option<String>,
    amt: Option<f64>,
}

#[derive(Deserialize, ToSchema, Clone)]
pub struct UpdateInvoiceDto {
    amt: Option<f64>,
    paid: Option<bool>,
}

// --- Response shapes ---

#[derive(FromQueryResult, Serialize, ToSchema)]
pub struct InvoiceSummary {
    pub id: i32,
    pub comp_code: String,
}

#[derive(Serialize, ToSchema)]
pub struct InvoiceListResponse {
    pub invoices: Vec<InvoiceSummary>,
}

#[derive(Serialize, ToSchema)]
pub struct InvoiceResponse {
    pub invoice: invoices::Model,
}

/// The mark-paid update is unconditional, so a missing invoice comes back as
/// `{"invoice": null}` rather than a 404.
#[derive(Serialize, ToSchema)]
pub struct MarkPaidResponse {
    pub invoice: Option<invoices::Model>,
}

#[derive(Serialize, ToSchema)]
pub struct DeleteInvoiceResponse {
    pub msg: String,
    pub invoice: invoices::Model,
}

#[derive(Serialize, ToSchema)]
pub struct InvoiceCompany {
    pub code: String,
    pub name: String,
    pub description: String,
}

#[derive(Serialize, ToSchema)]
pub struct InvoiceDetail {
    pub id: i32,
    pub amt: f64,
    pub paid: bool,
    #[schema(value_type = String, format = Date)]
    pub add_date: Date,
    #[schema(value_type = Option<String>, format = Date)]
    pub paid_date: Option<Date>,
    pub company: InvoiceCompany,
}

#[derive(Serialize, ToSchema)]
pub struct InvoiceDetailResponse {
    pub invoice: InvoiceDetail,
}

/// Flat row shape produced by the invoice/company join.
#[derive(FromQueryResult)]
struct InvoiceCompanyRow {
    id: i32,
    amt: f64,
    paid: bool,
    add_date: Date,
    paid_date: Option<Date>,
    code: String,
    name: String,
    description: String,
}

// --- Route Handlers ---

#[utoipa::path(
    get,
    path = "/invoices",
    tag = "Invoices",
    responses(
        (status = 200, description = "List all invoices", body = InvoiceListResponse),
        (status = 404, description = "No invoices exist")
    )
)]
#[get("")]
pub async fn list_invoices(data: web::Data<AppState>) -> Result<HttpResponse, ApiError> {
    let invoices = invoices::Entity::find()
        .select_only()
        .column(invoices::Column::Id)
        .column(invoices::Column::CompCode)
        .into_model::<InvoiceSummary>()
        .all(&data.db)
        .await?;

    if invoices.is_empty() {
        return Err(ApiError::NotFound("No results found".to_string()));
    }

    Ok(HttpResponse::Ok().json(InvoiceListResponse { invoices }))
}

#[utoipa::path(
    get,
    path = "/invoices/{id}",
    tag = "Invoices",
    params(
        ("id" = i32, Path, description = "Invoice id")
    ),
    responses(
        (status = 200, description = "Invoice with its company nested", body = InvoiceDetailResponse),
        (status = 404, description = "Invoice not found")
    )
)]
#[get("/{id}")]
pub async fn get_invoice(
    data: web::Data<AppState>,
    path: web::Path<i32>,
) -> Result<HttpResponse, ApiError> {
    let id = path.into_inner();
    let row = InvoiceCompanyRow::find_by_statement(Statement::from_sql_and_values(
        DatabaseBackend::Postgres,
        r#"SELECT invoices.id, invoices.amt, invoices.paid, invoices.add_date,
                  invoices.paid_date, companies.code, companies.name, companies.description
           FROM invoices
           JOIN companies ON companies.code = invoices.comp_code
           WHERE invoices.id = $1"#,
        [id.into()],
    ))
    .one(&data.db)
    .await?
    .ok_or_else(|| ApiError::NotFound("No results found".to_string()))?;

    let invoice = InvoiceDetail {
        id: row.id,
        amt: row.amt,
        paid: row.paid,
        add_date: row.add_date,
        paid_date: row.paid_date,
        company: InvoiceCompany {
            code: row.code,
            name: row.name,
            description: row.description,
        },
    };

    Ok(HttpResponse::Ok().json(InvoiceDetailResponse { invoice }))
}

#[utoipa::path(
    post,
    path = "/invoices",
    tag = "Invoices",
    request_body = CreateInvoiceDto,
    responses(
        (status = 201, description = "Invoice created unpaid", body = InvoiceResponse),
        (status = 400, description = "Missing comp_code or amt")
    )
)]
#[post("")]
pub async fn create_invoice(
    data: web::Data<AppState>,
    dto: web::Json<CreateInvoiceDto>,
) -> Result<HttpResponse, ApiError> {
    let comp_code = require(dto.comp_code.as_deref(), "Bad request")?;
    let amt = require_amount(dto.amt, "Bad request")?;

    // New invoices always start unpaid; add_date comes from the store default.
    let invoice = invoices::ActiveModel {
        id: NotSet,
        comp_code: Set(comp_code),
        amt: Set(amt),
        paid: Set(false),
        add_date: NotSet,
        paid_date: Set(None),
    };

    let created = invoice.insert(&data.db).await?;
    Ok(HttpResponse::Created().json(InvoiceResponse { invoice: created }))
}

#[utoipa::path(
    patch,
    path = "/invoices/{id}",
    tag = "Invoices",
    params(
        ("id" = i32, Path, description = "Invoice id")
    ),
    request_body = UpdateInvoiceDto,
    responses(
        (status = 200, description = "Invoice marked paid or amount updated", body = InvoiceResponse),
        (status = 400, description = "No amount to update"),
        (status = 404, description = "Invoice not found")
    )
)]
#[patch("/{id}")]
pub async fn update_invoice(
    data: web::Data<AppState>,
    path: web::Path<i32>,
    dto: web::Json<UpdateInvoiceDto>,
) -> Result<HttpResponse, ApiError> {
    let id = path.into_inner();

    // Marking paid stamps the payment date server-side and skips the
    // existence check the amount branch performs.
    if dto.paid == Some(true) {
        let invoice = invoices::Model::find_by_statement(Statement::from_sql_and_values(
            DatabaseBackend::Postgres,
            r#"UPDATE invoices
               SET paid = TRUE, paid_date = CURRENT_DATE
               WHERE id = $1
               RETURNING id, comp_code, amt, paid, add_date, paid_date"#,
            [id.into()],
        ))
        .one(&data.db)
        .await?;

        return Ok(HttpResponse::Ok().json(MarkPaidResponse { invoice }));
    }

    let invoice = invoices::Entity::find_by_id(id)
        .one(&data.db)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("No result found for {}", id)))?;

    let amt = require_amount(dto.amt, "No amount to update")?;

    let mut active_model = invoice.into_active_model();
    active_model.amt = Set(amt);

    let updated = active_model.update(&data.db).await?;
    Ok(HttpResponse::Ok().json(InvoiceResponse { invoice: updated }))
}

#[utoipa::path(
    delete,
    path = "/invoices/{id}",
    tag = "Invoices",
    params(
        ("id" = i32, Path, description = "Invoice id")
    ),
    responses(
        (status = 200, description = "Invoice deleted", body = DeleteInvoiceResponse),
        (status = 404, description = "Invoice not found")
    )
)]
#[delete("/{id}")]
pub async fn delete_invoice(
    data: web::Data<AppState>,
    path: web::Path<i32>,
) -> Result<HttpResponse, ApiError> {
    let id = path.into_inner();
    let invoice = invoices::Entity::find_by_id(id)
        .one(&data.db)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("No result found for {}", id)))?;

    invoice.clone().into_active_model().delete(&data.db).await?;

    Ok(HttpResponse::Ok().json(DeleteInvoiceResponse {
        msg: "Deleted".to_string(),
        invoice,
    }))
}

pub fn init_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/invoices")
            .service(list_invoices)
            .service(get_invoice)
            .service(create_invoice)
            .service(update_invoice)
            .service(delete_invoice),
    );
}
