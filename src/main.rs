use actix_web::{middleware, web, App, HttpServer};
use dotenvy::dotenv;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use biztime::api::{self, companies, industries, invoices};
use biztime::app_state::AppState;
use biztime::config::Config;
use biztime::database;
use biztime::database::models;

#[derive(OpenApi)]
#[openapi(
    paths(
        // Companies
        companies::list_companies,
        companies::get_company,
        companies::create_company,
        companies::update_company,
        companies::delete_company,
        // Invoices
        invoices::list_invoices,
        invoices::get_invoice,
        invoices::create_invoice,
        invoices::update_invoice,
        invoices::delete_invoice,
        // Industries
        industries::list_industries,
        industries::create_industry,
        industries::add_company,
    ),
    components(
        schemas(
            // --- Models ---
            models::companies::Model,
            models::invoices::Model,
            models::industries::Model,
            models::company_industries::Model,

            // --- DTOs & response shapes ---
            companies::CompanyFieldsDto,
            companies::CompanySummary,
            companies::CompanyListResponse,
            companies::CompanyResponse,
            companies::CompanyDetailResponse,
            companies::DeleteCompanyResponse,
            invoices::CreateInvoiceDto,
            invoices::UpdateInvoiceDto,
            invoices::InvoiceSummary,
            invoices::InvoiceListResponse,
            invoices::InvoiceResponse,
            invoices::MarkPaidResponse,
            invoices::InvoiceDetailResponse,
            invoices::DeleteInvoiceResponse,
            industries::CreateIndustryDto,
            industries::AddCompanyDto,
            industries::IndustryResponse,
        )
    ),
    tags(
        (name = "Companies", description = "Company management endpoints"),
        (name = "Invoices", description = "Invoice management endpoints"),
        (name = "Industries", description = "Industry management and association endpoints")
    )
)]
struct ApiDoc;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config = Config::from_env().expect("Failed to load configuration");
    let db = database::connect()
        .await
        .expect("Failed to connect to database");

    let host = config.host.clone();
    let port = config.port;
    let json_limit = config.effective_max_body_bytes();
    let state = web::Data::new(AppState { db, config });

    log::info!("Starting server at http://{}:{}", host, port);
    log::info!("Swagger UI available at http://{}:{}/swagger-ui/", host, port);

    HttpServer::new(move || {
        App::new()
            .wrap(middleware::NormalizePath::trim())
            .wrap(api::middleware::RequestId)
            .app_data(web::JsonConfig::default().limit(json_limit))
            .app_data(state.clone())
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}").url("/api-docs/openapi.json", ApiDoc::openapi()),
            )
            .configure(api::configure)
    })
    .bind((host, port))?
    .run()
    .await
}
