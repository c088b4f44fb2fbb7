//! Binding between each registered table, its row type and its admin form.

use chrono::{Local, NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use sqlx::postgres::PgRow;
use sqlx::FromRow;
use std::fmt;
use uuid::Uuid;

use super::fields::{Assignments, FieldValue, FormErrors};
use super::site::{self, ModelAdmin};
use crate::models::{
    Address, Company, Enrollment, EnrollmentStatus, Event, EventStatus, Order, OrderItem,
    OrderStatus, Payment, PaymentStatus, Ticket, TicketSale, TicketStatus, User,
};
use crate::utils::error::AppError;

/// Wall-clock time as stored in the timestamp columns.
pub fn local_now() -> NaiveDateTime {
    Local::now().naive_local()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Update,
}

pub trait AdminResource:
    for<'r> FromRow<'r, PgRow> + Serialize + Send + Sync + Unpin + 'static
{
    type Id: DeserializeOwned + Into<FieldValue> + fmt::Display + Clone + Send + Sync + 'static;
    type Form: DeserializeOwned + Send + 'static;

    /// Singular caption used in messages.
    const NAME: &'static str;
    /// Model name used in default labels, e.g. `Payments object (7)`.
    const MODEL: &'static str;
    const TABLE: &'static str;
    const PRIMARY_KEY: &'static str = "id";

    fn model_admin() -> ModelAdmin;

    fn id(&self) -> Self::Id;

    /// Key for a new row, when the application rather than the database assigns it.
    fn generate_id() -> Option<Self::Id> {
        None
    }

    fn validate(form: &Self::Form, mode: FormMode) -> Result<(), AppError>;

    fn assignments(form: Self::Form, mode: FormMode) -> Assignments;

    fn label(&self) -> String {
        format!("{} object ({})", Self::MODEL, self.id())
    }
}

/// `created_at` on insert, `updated_at` on every write.
fn stamp(assignments: &mut Assignments, mode: FormMode, has_updated_at: bool) {
    let now = local_now();
    if mode == FormMode::Create {
        assignments.push(("created_at", now.into()));
    }
    if has_updated_at {
        assignments.push(("updated_at", now.into()));
    }
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Deserialize)]
pub struct AddressForm {
    pub street: String,
    pub number: String,
    pub complement: Option<String>,
    pub neighborhood: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub country: String,
}

impl AdminResource for Address {
    type Id = Uuid;
    type Form = AddressForm;

    const NAME: &'static str = "Endereço";
    const MODEL: &'static str = "Addresses";
    const TABLE: &'static str = "addresses";

    fn model_admin() -> ModelAdmin {
        site::addresses_admin()
    }

    fn id(&self) -> Uuid {
        self.id
    }

    fn generate_id() -> Option<Uuid> {
        Some(Uuid::new_v4())
    }

    fn validate(form: &AddressForm, _mode: FormMode) -> Result<(), AppError> {
        FormErrors::new()
            .required("street", &form.street)
            .required("number", &form.number)
            .optional("complement", &form.complement)
            .required("neighborhood", &form.neighborhood)
            .required("city", &form.city)
            .required("state", &form.state)
            .required("zip_code", &form.zip_code)
            .required("country", &form.country)
            .finish()
    }

    fn assignments(form: AddressForm, _mode: FormMode) -> Assignments {
        vec![
            ("street", form.street.into()),
            ("number", form.number.into()),
            ("complement", form.complement.into()),
            ("neighborhood", form.neighborhood.into()),
            ("city", form.city.into()),
            ("state", form.state.into()),
            ("zip_code", form.zip_code.into()),
            ("country", form.country.into()),
        ]
    }

    fn label(&self) -> String {
        self.to_string()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CompanyForm {
    pub name: String,
    pub cnpj: String,
    pub description: Option<String>,
    pub owner_id: Uuid,
    pub address_id: Option<Uuid>,
}

impl AdminResource for Company {
    type Id = Uuid;
    type Form = CompanyForm;

    const NAME: &'static str = "Organizador";
    const MODEL: &'static str = "Companies";
    const TABLE: &'static str = "companies";

    fn model_admin() -> ModelAdmin {
        site::companies_admin()
    }

    fn id(&self) -> Uuid {
        self.id
    }

    fn generate_id() -> Option<Uuid> {
        Some(Uuid::new_v4())
    }

    fn validate(form: &CompanyForm, _mode: FormMode) -> Result<(), AppError> {
        FormErrors::new()
            .required("name", &form.name)
            .required("cnpj", &form.cnpj)
            .optional("description", &form.description)
            .finish()
    }

    fn assignments(form: CompanyForm, _mode: FormMode) -> Assignments {
        vec![
            ("name", form.name.into()),
            ("cnpj", form.cnpj.into()),
            ("description", form.description.into()),
            ("owner_id", form.owner_id.into()),
            ("address_id", form.address_id.into()),
        ]
    }

    fn label(&self) -> String {
        self.to_string()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct EventForm {
    pub name: String,
    pub description: Option<String>,
    pub init_date: NaiveDate,
    pub end_date: NaiveDate,
    #[serde(default)]
    pub status: EventStatus,
    pub address_id: Option<Uuid>,
    pub company_id: Option<Uuid>,
    pub event_thumbnail_id: Option<Uuid>,
}

impl AdminResource for Event {
    type Id = Uuid;
    type Form = EventForm;

    const NAME: &'static str = "Evento";
    const MODEL: &'static str = "Events";
    const TABLE: &'static str = "events";

    fn model_admin() -> ModelAdmin {
        site::events_admin()
    }

    fn id(&self) -> Uuid {
        self.id
    }

    fn generate_id() -> Option<Uuid> {
        Some(Uuid::new_v4())
    }

    fn validate(form: &EventForm, _mode: FormMode) -> Result<(), AppError> {
        FormErrors::new()
            .required("name", &form.name)
            .check(
                form.init_date <= form.end_date,
                "init_date must not be after end_date",
            )
            .finish()
    }

    fn assignments(form: EventForm, _mode: FormMode) -> Assignments {
        vec![
            ("name", form.name.into()),
            ("description", form.description.into()),
            ("init_date", form.init_date.into()),
            ("end_date", form.end_date.into()),
            ("status", form.status.into()),
            ("address_id", form.address_id.into()),
            ("company_id", form.company_id.into()),
            ("event_thumbnail_id", form.event_thumbnail_id.into()),
        ]
    }

    fn label(&self) -> String {
        self.to_string()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct EnrollmentForm {
    pub name: String,
    pub email: String,
    pub document: String,
    pub birth_date: NaiveDate,
    pub event_id: Uuid,
    pub user_id: Option<Uuid>,
    #[serde(default)]
    pub status: EnrollmentStatus,
}

impl AdminResource for Enrollment {
    type Id = Uuid;
    type Form = EnrollmentForm;

    const NAME: &'static str = "Inscrição";
    const MODEL: &'static str = "Enrollments";
    const TABLE: &'static str = "enrollments";

    fn model_admin() -> ModelAdmin {
        site::enrollments_admin()
    }

    fn id(&self) -> Uuid {
        self.id
    }

    fn generate_id() -> Option<Uuid> {
        Some(Uuid::new_v4())
    }

    fn validate(form: &EnrollmentForm, _mode: FormMode) -> Result<(), AppError> {
        FormErrors::new()
            .required("name", &form.name)
            .required("email", &form.email)
            .required("document", &form.document)
            .finish()
    }

    fn assignments(form: EnrollmentForm, mode: FormMode) -> Assignments {
        let mut assignments: Assignments = vec![
            ("name", form.name.into()),
            ("email", form.email.into()),
            ("document", form.document.into()),
            ("birth_date", form.birth_date.into()),
            ("event_id", form.event_id.into()),
            ("user_id", form.user_id.into()),
            ("status", form.status.into()),
        ];
        // updated_at stays empty until the first edit
        stamp(&mut assignments, mode, mode == FormMode::Update);
        assignments
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct OrderForm {
    pub name: String,
    pub email: String,
    pub document: String,
    pub phone_number: String,
    pub birth_date: NaiveDate,
    pub customer_id: Uuid,
    pub status: OrderStatus,
    pub payment_url: Option<String>,
}

impl AdminResource for Order {
    type Id = i64;
    type Form = OrderForm;

    const NAME: &'static str = "Pedido";
    const MODEL: &'static str = "Orders";
    const TABLE: &'static str = "orders";

    fn model_admin() -> ModelAdmin {
        site::orders_admin()
    }

    fn id(&self) -> i64 {
        self.id
    }

    fn validate(form: &OrderForm, _mode: FormMode) -> Result<(), AppError> {
        FormErrors::new()
            .required("name", &form.name)
            .required("email", &form.email)
            .required("document", &form.document)
            .required("phone_number", &form.phone_number)
            .optional("payment_url", &form.payment_url)
            .finish()
    }

    fn assignments(form: OrderForm, mode: FormMode) -> Assignments {
        let mut assignments: Assignments = vec![
            ("name", form.name.into()),
            ("email", form.email.into()),
            ("document", form.document.into()),
            ("phone_number", form.phone_number.into()),
            ("birth_date", form.birth_date.into()),
            ("customer_id", form.customer_id.into()),
            ("status", form.status.into()),
            ("payment_url", form.payment_url.into()),
        ];
        stamp(&mut assignments, mode, true);
        assignments
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct OrderItemForm {
    pub quantity: i32,
    pub order_id: Option<i64>,
    pub ticket_id: Uuid,
}

impl AdminResource for OrderItem {
    type Id = i64;
    type Form = OrderItemForm;

    const NAME: &'static str = "Item do Pedido";
    const MODEL: &'static str = "OrderItems";
    const TABLE: &'static str = "order_items";

    fn model_admin() -> ModelAdmin {
        site::order_items_admin()
    }

    fn id(&self) -> i64 {
        self.id
    }

    fn validate(form: &OrderItemForm, _mode: FormMode) -> Result<(), AppError> {
        FormErrors::new()
            .non_negative("quantity", form.quantity)
            .finish()
    }

    fn assignments(form: OrderItemForm, _mode: FormMode) -> Assignments {
        vec![
            ("quantity", form.quantity.into()),
            ("order_id", form.order_id.into()),
            ("ticket_id", form.ticket_id.into()),
        ]
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct PaymentForm {
    pub order_id: i64,
    pub amount: Decimal,
    pub currency: String,
    pub external_id: String,
    pub payment_type: String,
    pub status: PaymentStatus,
    pub approval_date: Option<NaiveDateTime>,
}

impl AdminResource for Payment {
    type Id = i64;
    type Form = PaymentForm;

    const NAME: &'static str = "Pagamento";
    const MODEL: &'static str = "Payments";
    const TABLE: &'static str = "payments";

    fn model_admin() -> ModelAdmin {
        site::payments_admin()
    }

    fn id(&self) -> i64 {
        self.id
    }

    fn validate(form: &PaymentForm, _mode: FormMode) -> Result<(), AppError> {
        FormErrors::new()
            .non_negative("amount", form.amount)
            .required("currency", &form.currency)
            .required("external_id", &form.external_id)
            .required("payment_type", &form.payment_type)
            .finish()
    }

    fn assignments(form: PaymentForm, mode: FormMode) -> Assignments {
        let mut assignments: Assignments = vec![
            ("order_id", form.order_id.into()),
            ("amount", form.amount.into()),
            ("currency", form.currency.into()),
            ("external_id", form.external_id.into()),
            ("payment_type", form.payment_type.into()),
            ("status", form.status.into()),
            ("approval_date", form.approval_date.into()),
        ];
        stamp(&mut assignments, mode, true);
        assignments
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct TicketSaleForm {
    pub name: String,
    pub description: String,
    #[serde(default = "default_true")]
    pub active: bool,
    #[serde(default = "TicketSaleForm::default_entries")]
    pub entries: i32,
    pub price: Decimal,
    #[serde(default = "TicketSaleForm::default_stock")]
    pub stock: i32,
    pub event_id: Uuid,
}

impl TicketSaleForm {
    fn default_entries() -> i32 {
        1
    }

    fn default_stock() -> i32 {
        10_000
    }
}

impl AdminResource for TicketSale {
    type Id = Uuid;
    type Form = TicketSaleForm;

    const NAME: &'static str = "Ingresso Para Venda";
    const MODEL: &'static str = "TicketSale";
    const TABLE: &'static str = "ticket_sale";

    fn model_admin() -> ModelAdmin {
        site::ticket_sale_admin()
    }

    fn id(&self) -> Uuid {
        self.id
    }

    fn generate_id() -> Option<Uuid> {
        Some(Uuid::new_v4())
    }

    fn validate(form: &TicketSaleForm, _mode: FormMode) -> Result<(), AppError> {
        FormErrors::new()
            .required("name", &form.name)
            .required("description", &form.description)
            .non_negative("entries", form.entries)
            .non_negative("price", form.price)
            .non_negative("stock", form.stock)
            .finish()
    }

    fn assignments(form: TicketSaleForm, _mode: FormMode) -> Assignments {
        vec![
            ("name", form.name.into()),
            ("description", form.description.into()),
            ("active", form.active.into()),
            ("entries", form.entries.into()),
            ("price", form.price.into()),
            ("stock", form.stock.into()),
            ("event_id", form.event_id.into()),
        ]
    }

    fn label(&self) -> String {
        self.to_string()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct TicketForm {
    pub code: String,
    pub description: String,
    pub valid_in: NaiveDate,
    pub expired_in: NaiveDate,
    pub last_time_consumed: Option<NaiveDateTime>,
    pub enrollment_id: Uuid,
    pub event_id: Uuid,
    pub ticket_sale_id: Uuid,
    pub status: TicketStatus,
}

impl AdminResource for Ticket {
    type Id = Uuid;
    type Form = TicketForm;

    const NAME: &'static str = "Ingresso";
    const MODEL: &'static str = "Tickets";
    const TABLE: &'static str = "tickets";

    fn model_admin() -> ModelAdmin {
        site::tickets_admin()
    }

    fn id(&self) -> Uuid {
        self.id
    }

    fn generate_id() -> Option<Uuid> {
        Some(Uuid::new_v4())
    }

    fn validate(form: &TicketForm, _mode: FormMode) -> Result<(), AppError> {
        FormErrors::new()
            .required("code", &form.code)
            .required("description", &form.description)
            .check(
                form.valid_in <= form.expired_in,
                "valid_in must not be after expired_in",
            )
            .finish()
    }

    fn assignments(form: TicketForm, mode: FormMode) -> Assignments {
        let mut assignments: Assignments = vec![
            ("code", form.code.into()),
            ("description", form.description.into()),
            ("valid_in", form.valid_in.into()),
            ("expired_in", form.expired_in.into()),
            ("last_time_consumed", form.last_time_consumed.into()),
            ("enrollment_id", form.enrollment_id.into()),
            ("event_id", form.event_id.into()),
            ("ticket_sale_id", form.ticket_sale_id.into()),
            ("status", form.status.into()),
        ];
        stamp(&mut assignments, mode, false);
        assignments
    }

    fn label(&self) -> String {
        self.to_string()
    }
}

/// Password columns are not part of the form at all; `document` is write-once.
#[derive(Debug, Clone, Deserialize)]
pub struct UserForm {
    pub username: String,
    pub name: String,
    pub bio: Option<String>,
    pub email: Option<String>,
    pub birth_date: Option<NaiveDate>,
    pub role_id: i32,
    pub company_id: Option<Uuid>,
    pub document: Option<String>,
    pub phone: Option<String>,
    pub active: bool,
}

impl AdminResource for User {
    type Id = Uuid;
    type Form = UserForm;

    const NAME: &'static str = "Usuário";
    const MODEL: &'static str = "Users";
    const TABLE: &'static str = "users";

    fn model_admin() -> ModelAdmin {
        site::users_admin()
    }

    fn id(&self) -> Uuid {
        self.id
    }

    fn generate_id() -> Option<Uuid> {
        Some(Uuid::new_v4())
    }

    fn validate(form: &UserForm, mode: FormMode) -> Result<(), AppError> {
        let document = form.document.as_deref().unwrap_or_default();
        FormErrors::new()
            .check(
                mode == FormMode::Update || !document.trim().is_empty(),
                "document is required",
            )
            .required("username", &form.username)
            .required("name", &form.name)
            .optional("bio", &form.bio)
            .optional("email", &form.email)
            .optional("document", &form.document)
            .optional("phone", &form.phone)
            .finish()
    }

    fn assignments(form: UserForm, mode: FormMode) -> Assignments {
        let mut assignments: Assignments = vec![
            ("username", form.username.into()),
            ("name", form.name.into()),
            ("bio", form.bio.into()),
            ("email", form.email.into()),
            ("birth_date", form.birth_date.into()),
            ("role_id", form.role_id.into()),
            ("company_id", form.company_id.into()),
            ("phone", form.phone.into()),
            ("active", form.active.into()),
        ];
        if mode == FormMode::Create {
            assignments.push(("document", form.document.into()));
        }
        assignments
    }

    fn label(&self) -> String {
        self.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn columns(assignments: &Assignments) -> Vec<&'static str> {
        assignments.iter().map(|(column, _)| *column).collect()
    }

    fn event_form() -> EventForm {
        serde_json::from_value(serde_json::json!({
            "name": "Semana de Tecnologia",
            "init_date": "2024-05-01",
            "end_date": "2024-05-03"
        }))
        .unwrap()
    }

    #[test]
    fn test_event_form_defaults_to_opened() {
        let form = event_form();
        assert_eq!(form.status, EventStatus::Opened);
        assert!(Event::validate(&form, FormMode::Create).is_ok());
    }

    #[test]
    fn test_event_dates_must_be_ordered() {
        let mut form = event_form();
        form.end_date = NaiveDate::from_ymd_opt(2024, 4, 30).unwrap();
        assert!(Event::validate(&form, FormMode::Create).is_err());
    }

    #[test]
    fn test_ticket_sale_form_defaults() {
        let form: TicketSaleForm = serde_json::from_value(serde_json::json!({
            "name": "Inteira",
            "description": "Ingresso inteira",
            "price": "25.00",
            "event_id": Uuid::nil()
        }))
        .unwrap();
        assert!(form.active);
        assert_eq!(form.entries, 1);
        assert_eq!(form.stock, 10_000);
        assert!(TicketSale::validate(&form, FormMode::Create).is_ok());
    }

    #[test]
    fn test_payment_form_rejects_unknown_status() {
        let result = serde_json::from_value::<PaymentForm>(serde_json::json!({
            "order_id": 7,
            "amount": "10.00",
            "currency": "BRL",
            "external_id": "mp-123",
            "payment_type": "pix",
            "status": "PAID"
        }));
        assert!(result.is_err());
    }

    #[test]
    fn test_timestamps_follow_mode() {
        let form: OrderForm = serde_json::from_value(serde_json::json!({
            "name": "Ana",
            "email": "ana@example.com",
            "document": "123",
            "phone_number": "11999999999",
            "birth_date": "2000-01-01",
            "customer_id": Uuid::nil(),
            "status": 11
        }))
        .unwrap();

        let created = columns(&Order::assignments(form.clone(), FormMode::Create));
        assert!(created.contains(&"created_at"));
        assert!(created.contains(&"updated_at"));

        let updated = columns(&Order::assignments(form, FormMode::Update));
        assert!(!updated.contains(&"created_at"));
        assert!(updated.contains(&"updated_at"));
    }

    #[test]
    fn test_user_document_is_write_once() {
        let form: UserForm = serde_json::from_value(serde_json::json!({
            "username": "ana",
            "name": "Ana",
            "role_id": 2,
            "document": "12345678900",
            "active": true
        }))
        .unwrap();

        assert!(form.active);
        assert!(User::validate(&form, FormMode::Create).is_ok());
        let mut anonymous = form.clone();
        anonymous.document = None;
        assert!(User::validate(&anonymous, FormMode::Create).is_err());
        assert!(User::validate(&anonymous, FormMode::Update).is_ok());
        assert!(columns(&User::assignments(form.clone(), FormMode::Create)).contains(&"document"));
        let update = columns(&User::assignments(form, FormMode::Update));
        assert!(!update.contains(&"document"));
        assert!(!update.iter().any(|c| c.starts_with("password")));
    }

    #[test]
    fn test_user_form_requires_active_flag() {
        let result = serde_json::from_value::<UserForm>(serde_json::json!({
            "username": "ana",
            "name": "Ana",
            "role_id": 2
        }));
        assert!(result.is_err());
    }

    #[test]
    fn test_default_label() {
        let item = OrderItem {
            id: 42,
            quantity: 2,
            order_id: Some(7),
            ticket_id: Uuid::nil(),
        };
        assert_eq!(item.label(), "OrderItems object (42)");
    }
}
