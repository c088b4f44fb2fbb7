pub mod address;
pub mod company;
pub mod enrollment;
pub mod event;
pub mod order;
pub mod payment;
pub mod status;
pub mod ticket;
pub mod user;

pub use address::Address;
pub use company::Company;
pub use enrollment::Enrollment;
pub use event::{Event, EventConfiguration, EventThumbnail};
pub use order::{Order, OrderItem};
pub use payment::Payment;
pub use status::{
    Choice, EnrollmentStatus, EventStatus, OrderStatus, PaymentStatus, TicketStatus,
    UnknownStatus,
};
pub use ticket::{Ticket, TicketSale};
pub use user::User;
