use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

// --- Companies ---
pub mod companies {
    use super::*;
    #[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, DeriveEntityModel, ToSchema)]
    #[schema(as = Company)]
    #[sea_orm(table_name = "companies")]
    pub struct Model {
        #[sea_orm(primary_key, auto_increment = false)]
        pub code: String,
        pub name: String,
        pub description: String,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {
        #[sea_orm(has_many = "super::invoices::Entity")]
        Invoices,
        #[sea_orm(has_many = "super::company_industries::Entity")]
        CompanyIndustries,
    }

    impl Related<super::invoices::Entity> for Entity {
        fn to() -> RelationDef {
            Relation::Invoices.def()
        }
    }

    impl Related<super::company_industries::Entity> for Entity {
        fn to() -> RelationDef {
            Relation::CompanyIndustries.def()
        }
    }

    impl ActiveModelBehavior for ActiveModel {}
}

// --- Invoices ---
pub mod invoices {
    use super::*;
    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize, DeriveEntityModel, ToSchema)]
    #[schema(as = Invoice)]
    #[sea_orm(table_name = "invoices")]
    pub struct Model {
        #[sea_orm(primary_key)]
        pub id: i32,
        pub comp_code: String,
        pub amt: f64,
        pub paid: bool,
        #[schema(value_type = String, format = Date)]
        pub add_date: Date,
        #[schema(value_type = Option<String>, format = Date)]
        pub paid_date: Option<Date>,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {
        #[sea_orm(
            belongs_to = "super::companies::Entity",
            from = "Column::CompCode",
            to = "super::companies::Column::Code"
        )]
        Companies,
    }

    impl Related<super::companies::Entity> for Entity {
        fn to() -> RelationDef {
            Relation::Companies.def()
        }
    }

    impl ActiveModelBehavior for ActiveModel {}
}

// --- Industries ---
pub mod industries {
    use super::*;
    #[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, DeriveEntityModel, ToSchema)]
    #[schema(as = Industry)]
    #[sea_orm(table_name = "industries")]
    pub struct Model {
        #[sea_orm(primary_key, auto_increment = false)]
        pub code: String,
        pub industry: String,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {
        #[sea_orm(has_many = "super::company_industries::Entity")]
        CompanyIndustries,
    }

    impl Related<super::company_industries::Entity> for Entity {
        fn to() -> RelationDef {
            Relation::CompanyIndustries.def()
        }
    }

    impl ActiveModelBehavior for ActiveModel {}
}

// --- Company/Industry association ---
pub mod company_industries {
    use super::*;
    #[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, DeriveEntityModel, ToSchema)]
    #[schema(as = CompanyIndustry)]
    #[sea_orm(table_name = "company_industries")]
    pub struct Model {
        #[sea_orm(primary_key, auto_increment = false)]
        pub comp_code: String,
        #[sea_orm(primary_key, auto_increment = false)]
        pub ind_code: String,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {
        #[sea_orm(
            belongs_to = "super::companies::Entity",
            from = "Column::CompCode",
            to = "super::companies::Column::Code"
        )]
        Companies,
        #[sea_orm(
            belongs_to = "super::industries::Entity",
            from = "Column::IndCode",
            to = "super::industries::Column::Code"
        )]
        Industries,
    }

    impl Related<super::companies::Entity> for Entity {
        fn to() -> RelationDef {
            Relation::Companies.def()
        }
    }

    impl Related<super::industries::Entity> for Entity {
        fn to() -> RelationDef {
            Relation::Industries.def()
        }
    }

    impl ActiveModelBehavior for ActiveModel {}
}
