//! The admin site registry: which tables are exposed and how their changelists look.

use serde::Serialize;

use crate::models::{
    Choice, EnrollmentStatus, EventStatus, OrderStatus, PaymentStatus, TicketStatus,
};

pub const SITE_HEADER: &str = "Tickets IFSP Admin";
pub const SITE_TITLE: &str = "Administração do Site";
pub const INDEX_TITLE: &str = "Painel Administrativo";

/// Pseudo-column meaning "the record's display label".
pub const LABEL_COLUMN: &str = "__str__";

#[derive(Debug, Clone, Serialize)]
pub struct ChoiceOption {
    pub value: String,
    pub label: &'static str,
}

pub fn choices<C: Choice>() -> Vec<ChoiceOption> {
    C::ALL
        .iter()
        .map(|choice| ChoiceOption {
            value: choice.literal(),
            label: choice.label(),
        })
        .collect()
}

#[derive(Debug, Clone, Serialize)]
pub struct InlineAdmin {
    pub table: &'static str,
    pub verbose_name_plural: &'static str,
    pub fields: &'static [&'static str],
    pub extra: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct ModelAdmin {
    pub slug: &'static str,
    pub table: &'static str,
    pub verbose_name: &'static str,
    pub verbose_name_plural: &'static str,
    pub list_display: &'static [&'static str],
    pub list_filter: &'static [&'static str],
    /// Filters over date or timestamp columns, which also accept range lookups.
    pub date_filters: &'static [&'static str],
    pub search_fields: &'static [&'static str],
    pub inlines: Vec<InlineAdmin>,
    /// Closed choice sets keyed by column.
    pub choices: Vec<(&'static str, Vec<ChoiceOption>)>,
}

impl ModelAdmin {
    /// A registration with the stock changelist: label column only, no search or filters.
    pub fn plain(
        slug: &'static str,
        table: &'static str,
        verbose_name: &'static str,
        verbose_name_plural: &'static str,
    ) -> Self {
        Self {
            slug,
            table,
            verbose_name,
            verbose_name_plural,
            list_display: &[LABEL_COLUMN],
            list_filter: &[],
            date_filters: &[],
            search_fields: &[],
            inlines: Vec::new(),
            choices: Vec::new(),
        }
    }

    /// The registered filter column matching `name`, if any.
    pub fn filter_column(&self, name: &str) -> Option<&'static str> {
        self.list_filter.iter().copied().find(|column| *column == name)
    }

    pub fn is_date_filter(&self, column: &str) -> bool {
        self.date_filters.contains(&column)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct AdminSite {
    pub site_header: &'static str,
    pub site_title: &'static str,
    pub index_title: &'static str,
    pub models: Vec<ModelAdmin>,
}

impl AdminSite {
    pub fn model(&self, slug: &str) -> Option<&ModelAdmin> {
        self.models.iter().find(|model| model.slug == slug)
    }
}

pub fn event_configurations_inline() -> InlineAdmin {
    InlineAdmin {
        table: "event_configurations",
        verbose_name_plural: "Configurações de Evento",
        fields: &["key", "value"],
        extra: super::defaults::EXTRA_ROWS,
    }
}

pub fn events_admin() -> ModelAdmin {
    ModelAdmin {
        list_display: &["name", "status", "init_date", "end_date", "company_id"],
        list_filter: &["status", "init_date", "end_date"],
        date_filters: &["init_date", "end_date"],
        search_fields: &["name", "description"],
        inlines: vec![event_configurations_inline()],
        choices: vec![("status", choices::<EventStatus>())],
        ..ModelAdmin::plain("events", "events", "Evento", "Eventos")
    }
}

pub fn enrollments_admin() -> ModelAdmin {
    ModelAdmin {
        list_display: &["name", "email", "event_id", "status"],
        list_filter: &["status", "event_id"],
        search_fields: &["name", "email", "document"],
        choices: vec![("status", choices::<EnrollmentStatus>())],
        ..ModelAdmin::plain("enrollments", "enrollments", "Inscrição", "Inscrições")
    }
}

pub fn orders_admin() -> ModelAdmin {
    ModelAdmin {
        list_display: &["name", "email", "status", "created_at"],
        list_filter: &["status", "created_at"],
        date_filters: &["created_at"],
        search_fields: &["name", "email", "document"],
        choices: vec![("status", choices::<OrderStatus>())],
        ..ModelAdmin::plain("orders", "orders", "Pedido", "Pedidos")
    }
}

pub fn payments_admin() -> ModelAdmin {
    ModelAdmin {
        list_display: &["id", "order_id", "status", "amount", "created_at"],
        list_filter: &["status", "created_at"],
        date_filters: &["created_at"],
        search_fields: &["order_id", "external_id"],
        choices: vec![("status", choices::<PaymentStatus>())],
        ..ModelAdmin::plain("payments", "payments", "Pagamento", "Pagamentos")
    }
}

pub fn tickets_admin() -> ModelAdmin {
    ModelAdmin {
        list_display: &["id", "enrollment_id", "status", "created_at"],
        list_filter: &["status", "created_at"],
        date_filters: &["created_at"],
        search_fields: &["code", "description"],
        choices: vec![("status", choices::<TicketStatus>())],
        ..ModelAdmin::plain("tickets", "tickets", "Ingresso", "Ingressos")
    }
}

pub fn users_admin() -> ModelAdmin {
    ModelAdmin {
        list_display: &["username", "name", "email", "active", "role_id", "company_id"],
        list_filter: &["active", "role_id", "company_id"],
        search_fields: &["username", "name", "email", "document"],
        ..ModelAdmin::plain("users", "users", "Usuário", "Usuários")
    }
}

pub fn addresses_admin() -> ModelAdmin {
    ModelAdmin::plain("addresses", "addresses", "Endereço", "Endereços")
}

pub fn companies_admin() -> ModelAdmin {
    ModelAdmin::plain("companies", "companies", "Organizador", "Organizadores")
}

pub fn order_items_admin() -> ModelAdmin {
    ModelAdmin::plain("order-items", "order_items", "Item do Pedido", "Itens do Pedido")
}

pub fn ticket_sale_admin() -> ModelAdmin {
    ModelAdmin::plain(
        "ticket-sale",
        "ticket_sale",
        "Ingresso Para Venda",
        "Ingresso Para Venda",
    )
}

pub fn admin_site() -> AdminSite {
    AdminSite {
        site_header: SITE_HEADER,
        site_title: SITE_TITLE,
        index_title: INDEX_TITLE,
        models: vec![
            events_admin(),
            enrollments_admin(),
            orders_admin(),
            payments_admin(),
            tickets_admin(),
            users_admin(),
            addresses_admin(),
            companies_admin(),
            order_items_admin(),
            ticket_sale_admin(),
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_site_titles() {
        let site = admin_site();
        assert_eq!(site.site_header, "Tickets IFSP Admin");
        assert_eq!(site.index_title, "Painel Administrativo");
    }

    #[test]
    fn test_slugs_and_tables_are_unique() {
        let site = admin_site();
        let slugs: HashSet<_> = site.models.iter().map(|m| m.slug).collect();
        let tables: HashSet<_> = site.models.iter().map(|m| m.table).collect();
        assert_eq!(slugs.len(), site.models.len());
        assert_eq!(tables.len(), site.models.len());
        assert!(site.model("event_configurations").is_none());
        assert!(site.model("events_thumbnails").is_none());
    }

    #[test]
    fn test_only_events_have_an_inline() {
        let site = admin_site();
        for model in &site.models {
            if model.slug == "events" {
                assert_eq!(model.inlines.len(), 1);
                assert_eq!(model.inlines[0].fields, &["key", "value"]);
                assert_eq!(model.inlines[0].extra, 4);
            } else {
                assert!(model.inlines.is_empty(), "{} has an inline", model.slug);
            }
        }
    }

    #[test]
    fn test_plain_registrations_show_label() {
        let site = admin_site();
        for slug in ["addresses", "companies", "order-items", "ticket-sale"] {
            let model = site.model(slug).unwrap();
            assert_eq!(model.list_display, &[LABEL_COLUMN]);
            assert!(model.search_fields.is_empty());
        }
    }

    #[test]
    fn test_status_choices_carry_literals() {
        let events = events_admin();
        let (column, options) = &events.choices[0];
        assert_eq!(*column, "status");
        let values: Vec<&str> = options.iter().map(|o| o.value.as_str()).collect();
        assert_eq!(values, vec!["1", "2", "3", "4", "5", "6"]);

        let payments = payments_admin();
        assert_eq!(payments.choices[0].1[8].value, "CHARGED_BACK");
        assert_eq!(payments.filter_column("status"), Some("status"));
        assert_eq!(payments.filter_column("external_id"), None);
        assert!(payments.is_date_filter("created_at"));
        assert!(!payments.is_date_filter("status"));
    }
}
