// src/pages/orders.rs

use chrono::{Days, NaiveDate, Utc};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use tracing::{info, warn};
use uuid::Uuid;

use crate::errors::{AppError, Result};
use crate::forms::OrderForm;
use crate::models::{Order, OrderStatus, Product};
use crate::services::clipboard;
use crate::store::{OrderRepository, ProductRepository};
use crate::views::orders::{
  contact_info_block, order_empty_state, OrderDetailsView, OrderFormView, OrderPageView, OrderRowView,
  SummaryRowView, UpcomingRowView,
};

/// How long the copy-contact confirmation stays visible.
const COPY_CONFIRM_WINDOW: Duration = Duration::from_secs(2);

/// Length of the upcoming-deliveries window, inclusive of both ends.
const UPCOMING_WINDOW_DAYS: u64 = 7;

// --- Derived views ------------------------------------------------------
//
// Pure functions over the cached collection; the controller feeds them the
// current cache and `today`.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusFilter {
  /// Everything except Completed orders, which only appear when asked for.
  All,
  Status(OrderStatus),
}

impl StatusFilter {
  pub fn from_label(label: &str) -> Option<Self> {
    if label == "All" {
      return Some(StatusFilter::All);
    }
    OrderStatus::from_label(label).map(StatusFilter::Status)
  }

  pub fn label(&self) -> &'static str {
    match self {
      StatusFilter::All => "All",
      StatusFilter::Status(status) => status.label(),
    }
  }
}

pub fn filter_orders<'a>(
  orders: &'a [Order],
  status_filter: StatusFilter,
  delivery_date: Option<NaiveDate>,
) -> Vec<&'a Order> {
  orders
    .iter()
    .filter(|order| match status_filter {
      StatusFilter::All => order.status != OrderStatus::Completed,
      StatusFilter::Status(status) => order.status == status,
    })
    .filter(|order| match delivery_date {
      Some(date) => order.delivery_date == Some(date),
      None => true,
    })
    .collect()
}

#[derive(Debug, Clone)]
pub struct StatusSummary {
  pub label: &'static str,
  pub count: usize,
  pub total_cents: i64,
}

/// Per-status counts and totals. Unlike the list filter, the "All" row
/// covers literally every order, Completed included.
pub fn status_summaries(orders: &[Order]) -> Vec<StatusSummary> {
  let mut rows = vec![StatusSummary {
    label: "All",
    count: orders.len(),
    total_cents: orders.iter().map(|o| o.total_amount_cents).sum(),
  }];
  for status in OrderStatus::ALL {
    let matching = orders.iter().filter(|o| o.status == status);
    let (count, total_cents) = matching.fold((0, 0), |(c, t), o| (c + 1, t + o.total_amount_cents));
    rows.push(StatusSummary {
      label: status.label(),
      count,
      total_cents,
    });
  }
  rows
}

pub fn grand_total_cents(orders: &[&Order]) -> i64 {
  orders.iter().map(|o| o.total_amount_cents).sum()
}

/// Open orders with a delivery date within `[today, today + 7]`, ascending
/// by date. Completed and Cancelled orders never appear here.
pub fn upcoming_deliveries<'a>(orders: &'a [Order], today: NaiveDate) -> Vec<&'a Order> {
  let horizon = today + Days::new(UPCOMING_WINDOW_DAYS);
  let mut upcoming: Vec<&Order> = orders
    .iter()
    .filter(|order| !matches!(order.status, OrderStatus::Completed | OrderStatus::Cancelled))
    .filter(|order| match order.delivery_date {
      Some(date) => date >= today && date <= horizon,
      None => false,
    })
    .collect();
  upcoming.sort_by_key(|order| order.delivery_date);
  upcoming
}

// --- Controller ---------------------------------------------------------

/// Submitted order-form content (line items live in the open form session).
#[derive(Debug, Clone)]
pub struct OrderFormInput {
  pub customer_name: String,
  pub phone_number: String,
  pub delivery_address: String,
  pub delivery_date: String,
  pub payment_mode: String,
  pub is_paid: bool,
  pub status: String,
  pub notes: String,
}

struct FormSession {
  editing: Option<Uuid>,
  form: OrderForm,
}

struct PageState {
  loaded: bool,
  orders: Vec<Order>,
  products: Vec<Product>,
  error: Option<String>,
  form: Option<FormSession>,
  submitting: bool,
  status_filter: StatusFilter,
  delivery_date_filter: Option<NaiveDate>,
  show_upcoming: bool,
  last_copy: Option<(Uuid, Instant)>,
}

impl PageState {
  fn new() -> Self {
    PageState {
      loaded: false,
      orders: Vec::new(),
      products: Vec::new(),
      error: None,
      form: None,
      submitting: false,
      status_filter: StatusFilter::All,
      delivery_date_filter: None,
      show_upcoming: false,
      last_copy: None,
    }
  }

  fn view(&self, today: NaiveDate) -> OrderPageView {
    let filtered = filter_orders(&self.orders, self.status_filter, self.delivery_date_filter);
    OrderPageView {
      error: self.error.clone(),
      form: self
        .form
        .as_ref()
        .map(|session| OrderFormView::from_form(session.editing, &session.form)),
      submitting: self.submitting,
      status_filter: self.status_filter.label().to_string(),
      delivery_date_filter: self.delivery_date_filter.map(|d| d.format("%Y-%m-%d").to_string()),
      summary: status_summaries(&self.orders)
        .iter()
        .map(SummaryRowView::from_summary)
        .collect(),
      grand_total: crate::views::format_peso(grand_total_cents(&filtered)),
      upcoming: if self.show_upcoming {
        Some(
          upcoming_deliveries(&self.orders, today)
            .into_iter()
            .map(UpcomingRowView::from_order)
            .collect(),
        )
      } else {
        None
      },
      orders: filtered.into_iter().map(OrderRowView::from_order).collect(),
      count: self.orders.len(),
      empty_state: order_empty_state(self.orders.len(), self.products.len()),
    }
  }

  fn find_order(&self, id: Uuid) -> Result<&Order> {
    self
      .orders
      .iter()
      .find(|o| o.id == id)
      .ok_or_else(|| AppError::NotFound(format!("Order {} not found", id)))
  }

  fn splice(&mut self, updated: Order) {
    if let Some(slot) = self.orders.iter_mut().find(|o| o.id == updated.id) {
      *slot = updated;
    }
  }
}

pub struct OrderManagement {
  orders_repo: Arc<dyn OrderRepository>,
  products_repo: Arc<dyn ProductRepository>,
  state: Mutex<PageState>,
}

impl OrderManagement {
  pub fn new(orders_repo: Arc<dyn OrderRepository>, products_repo: Arc<dyn ProductRepository>) -> Self {
    OrderManagement {
      orders_repo,
      products_repo,
      state: Mutex::new(PageState::new()),
    }
  }

  fn today() -> NaiveDate {
    Utc::now().date_naive()
  }

  /// Load both collections together; the order form needs the catalog for
  /// its product picker. The join is fail-fast: if either fetch fails the
  /// page shows empty collections and one message, but always leaves the
  /// loading state.
  async fn ensure_loaded(&self, state: &mut PageState) {
    if state.loaded {
      return;
    }
    match tokio::try_join!(self.orders_repo.list(), self.products_repo.list()) {
      Ok((orders, products)) => {
        info!(orders = orders.len(), products = products.len(), "Loaded order data");
        state.orders = orders;
        state.products = products;
        state.error = None;
      }
      Err(e) => {
        warn!(error = %e, "Failed to load order data");
        state.orders = Vec::new();
        state.products = Vec::new();
        state.error = Some("Failed to load data".to_string());
      }
    }
    state.loaded = true;
  }

  pub async fn view(&self) -> OrderPageView {
    let mut state = self.state.lock().await;
    self.ensure_loaded(&mut state).await;
    state.view(Self::today())
  }

  pub async fn reload(&self) -> OrderPageView {
    let mut state = self.state.lock().await;
    state.loaded = false;
    self.ensure_loaded(&mut state).await;
    state.view(Self::today())
  }

  /// Set the status / delivery-date filters used by the list view.
  pub async fn set_filter(&self, status: &str, delivery_date: Option<&str>) -> Result<OrderPageView> {
    let status_filter =
      StatusFilter::from_label(status).ok_or_else(|| AppError::Validation(format!("Unknown status filter: {}", status)))?;
    let delivery_date_filter = match delivery_date {
      None | Some("") => None,
      Some(raw) => Some(
        NaiveDate::parse_from_str(raw, "%Y-%m-%d")
          .map_err(|_| AppError::Validation("Delivery date filter must use the YYYY-MM-DD format".to_string()))?,
      ),
    };

    let mut state = self.state.lock().await;
    self.ensure_loaded(&mut state).await;
    state.status_filter = status_filter;
    state.delivery_date_filter = delivery_date_filter;
    Ok(state.view(Self::today()))
  }

  /// Show or hide the upcoming-deliveries panel.
  pub async fn toggle_upcoming(&self) -> OrderPageView {
    let mut state = self.state.lock().await;
    self.ensure_loaded(&mut state).await;
    state.show_upcoming = !state.show_upcoming;
    state.view(Self::today())
  }

  pub async fn open_create(&self) -> OrderPageView {
    let mut state = self.state.lock().await;
    self.ensure_loaded(&mut state).await;
    if state.form.is_none() {
      state.form = Some(FormSession {
        editing: None,
        form: OrderForm::new(),
      });
    }
    state.view(Self::today())
  }

  pub async fn open_edit(&self, id: Uuid) -> Result<OrderPageView> {
    let mut state = self.state.lock().await;
    self.ensure_loaded(&mut state).await;
    let form = OrderForm::for_order(state.find_order(id)?);
    state.form = Some(FormSession {
      editing: Some(id),
      form,
    });
    Ok(state.view(Self::today()))
  }

  pub async fn cancel_form(&self) -> OrderPageView {
    let mut state = self.state.lock().await;
    state.form = None;
    state.view(Self::today())
  }

  // --- Line-item editing on the open form ---

  pub async fn add_form_item(&self) -> Result<OrderFormView> {
    let mut state = self.state.lock().await;
    let session = Self::open_session(&mut state)?;
    session.form.add_item();
    Ok(OrderFormView::from_form(session.editing, &session.form))
  }

  pub async fn remove_form_item(&self, index: usize) -> Result<OrderFormView> {
    let mut state = self.state.lock().await;
    let session = Self::open_session(&mut state)?;
    if !session.form.remove_item(index) {
      return Err(AppError::Validation(format!("No item row at position {}", index)));
    }
    Ok(OrderFormView::from_form(session.editing, &session.form))
  }

  /// Update one row: picking a product copies its name/price from the
  /// current catalog snapshot; a quantity change is applied as-is.
  pub async fn update_form_item(
    &self,
    index: usize,
    product_id: Option<Uuid>,
    quantity: Option<i64>,
  ) -> Result<OrderFormView> {
    let mut state = self.state.lock().await;
    let catalog = state.products.clone();
    let session = Self::open_session(&mut state)?;
    if index >= session.form.items.len() {
      return Err(AppError::Validation(format!("No item row at position {}", index)));
    }
    if let Some(product_id) = product_id {
      if !session.form.set_item_product(index, product_id, &catalog) {
        return Err(AppError::Validation(format!("Unknown product: {}", product_id)));
      }
    }
    if let Some(quantity) = quantity {
      session.form.set_item_quantity(index, quantity);
    }
    Ok(OrderFormView::from_form(session.editing, &session.form))
  }

  fn open_session(state: &mut PageState) -> Result<&mut FormSession> {
    state
      .form
      .as_mut()
      .ok_or_else(|| AppError::Validation("No order form is open".to_string()))
  }

  /// Submit the open form. Same contract as the product form: validate
  /// before any store call, refuse re-entry while in flight, keep the form
  /// populated on failure.
  pub async fn submit(&self, input: OrderFormInput) -> Result<OrderPageView> {
    let status = OrderStatus::from_label(&input.status)
      .ok_or_else(|| AppError::Validation(format!("Unknown order status: {}", input.status)))?;

    let (editing, draft) = {
      let mut state = self.state.lock().await;
      self.ensure_loaded(&mut state).await;
      if state.submitting {
        return Err(AppError::SubmitPending);
      }
      let session = state
        .form
        .as_mut()
        .ok_or_else(|| AppError::Validation("No order form is open".to_string()))?;
      session.form.customer_name = input.customer_name;
      session.form.phone_number = input.phone_number;
      session.form.delivery_address = input.delivery_address;
      session.form.delivery_date = input.delivery_date;
      session.form.payment_mode = input.payment_mode;
      session.form.is_paid = input.is_paid;
      session.form.status = status;
      session.form.notes = input.notes;

      match session.form.validate() {
        Ok(draft) => {
          let editing = session.editing;
          state.submitting = true;
          (editing, draft)
        }
        Err(message) => {
          state.error = Some(message);
          return Ok(state.view(Self::today()));
        }
      }
    };

    let result = match editing {
      None => self.orders_repo.create(draft).await,
      Some(id) => self.orders_repo.update(id, draft).await,
    };

    let mut state = self.state.lock().await;
    state.submitting = false;
    match result {
      Ok(order) => {
        match editing {
          None => {
            info!(id = %order.id, "Order created");
            state.orders.insert(0, order);
          }
          Some(id) => {
            info!(%id, "Order updated");
            state.splice(order);
          }
        }
        state.form = None;
        state.error = None;
      }
      Err(e) => {
        warn!(error = %e, "Order submission failed");
        state.error = Some(
          if editing.is_none() {
            "Failed to add order"
          } else {
            "Failed to update order"
          }
          .to_string(),
        );
      }
    }
    Ok(state.view(Self::today()))
  }

  pub async fn delete(&self, id: Uuid, confirmed: bool) -> Result<OrderPageView> {
    if !confirmed {
      return Err(AppError::Validation("Deletion must be confirmed".to_string()));
    }
    {
      let mut state = self.state.lock().await;
      self.ensure_loaded(&mut state).await;
      state.find_order(id)?;
    }

    let result = self.orders_repo.delete(id).await;

    let mut state = self.state.lock().await;
    match result {
      Ok(()) => {
        info!(%id, "Order deleted");
        state.orders.retain(|o| o.id != id);
        state.error = None;
      }
      Err(e) => {
        warn!(error = %e, "Failed to delete order");
        state.error = Some("Failed to delete order".to_string());
      }
    }
    Ok(state.view(Self::today()))
  }

  /// Inline status change from the list: an updated draft with only the
  /// status changed, no form validation involved.
  pub async fn set_status(&self, id: Uuid, status_label: &str) -> Result<OrderPageView> {
    let status = OrderStatus::from_label(status_label)
      .ok_or_else(|| AppError::Validation(format!("Unknown order status: {}", status_label)))?;
    let draft = {
      let mut state = self.state.lock().await;
      self.ensure_loaded(&mut state).await;
      let order = state.find_order(id)?;
      let mut draft = order.draft();
      draft.status = status;
      draft
    };

    let result = self.orders_repo.update(id, draft).await;

    let mut state = self.state.lock().await;
    match result {
      Ok(order) => {
        info!(%id, status = %status, "Order status updated");
        state.splice(order);
        state.error = None;
      }
      Err(e) => {
        warn!(error = %e, "Failed to update order status");
        state.error = Some("Failed to update order status".to_string());
      }
    }
    Ok(state.view(Self::today()))
  }

  /// Inline paid/unpaid toggle from the list.
  pub async fn set_paid(&self, id: Uuid, is_paid: bool) -> Result<OrderPageView> {
    let draft = {
      let mut state = self.state.lock().await;
      self.ensure_loaded(&mut state).await;
      let order = state.find_order(id)?;
      let mut draft = order.draft();
      draft.is_paid = is_paid;
      draft
    };

    let result = self.orders_repo.update(id, draft).await;

    let mut state = self.state.lock().await;
    match result {
      Ok(order) => {
        info!(%id, is_paid, "Order payment flag updated");
        state.splice(order);
        state.error = None;
      }
      Err(e) => {
        warn!(error = %e, "Failed to update payment status");
        state.error = Some("Failed to update payment status".to_string());
      }
    }
    Ok(state.view(Self::today()))
  }

  /// Read-only expanded view of one order.
  pub async fn details(&self, id: Uuid) -> Result<OrderDetailsView> {
    let mut state = self.state.lock().await;
    self.ensure_loaded(&mut state).await;
    let copy_confirmed = copy_confirmation_active(&state.last_copy, id, Instant::now());
    let order = state.find_order(id)?;
    Ok(OrderDetailsView::from_order(order, copy_confirmed))
  }

  /// Assemble the contact block, hand it to the clipboard, and remember the
  /// copy so the details view can show its transient confirmation.
  pub async fn copy_contact(&self, id: Uuid) -> Result<String> {
    let text = {
      let mut state = self.state.lock().await;
      self.ensure_loaded(&mut state).await;
      contact_info_block(state.find_order(id)?)
    };

    clipboard::write_text(&text).await?;

    let mut state = self.state.lock().await;
    state.last_copy = Some((id, Instant::now()));
    Ok(text)
  }
}

/// Whether the copy confirmation for `id` is still inside its two-second
/// window at `now`.
pub fn copy_confirmation_active(last_copy: &Option<(Uuid, Instant)>, id: Uuid, now: Instant) -> bool {
  match last_copy {
    Some((copied_id, at)) => *copied_id == id && now.duration_since(*at) <= COPY_CONFIRM_WINDOW,
    None => false,
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::models::{OrderDraft, OrderItem};
  use chrono::Utc;

  fn order(status: OrderStatus, delivery_date: Option<&str>, total_cents: i64) -> Order {
    let now = Utc::now();
    Order::from_draft(
      Uuid::new_v4(),
      OrderDraft {
        customer_name: "Customer".to_string(),
        phone_number: "09123456789".to_string(),
        delivery_address: "Somewhere".to_string(),
        delivery_date: delivery_date.map(|d| d.parse().expect("valid date")),
        payment_mode: None,
        is_paid: false,
        status,
        ordered_items: vec![OrderItem {
          product_id: Uuid::new_v4(),
          product_name: "Item".to_string(),
          price_cents: total_cents,
          quantity: 1,
        }],
        total_amount_cents: total_cents,
        notes: None,
      },
      now,
      now,
    )
  }

  fn date(s: &str) -> NaiveDate {
    s.parse().expect("valid date")
  }

  #[test]
  fn all_filter_hides_completed_orders() {
    let orders = vec![
      order(OrderStatus::Pending, None, 100),
      order(OrderStatus::Completed, None, 200),
      order(OrderStatus::Cancelled, None, 300),
    ];
    let visible = filter_orders(&orders, StatusFilter::All, None);
    assert_eq!(visible.len(), 2);
    assert!(visible.iter().all(|o| o.status != OrderStatus::Completed));

    let completed = filter_orders(&orders, StatusFilter::Status(OrderStatus::Completed), None);
    assert_eq!(completed.len(), 1);
    assert_eq!(completed[0].status, OrderStatus::Completed);
  }

  #[test]
  fn delivery_date_filter_matches_exactly() {
    let orders = vec![
      order(OrderStatus::Pending, Some("2025-08-20"), 100),
      order(OrderStatus::Pending, Some("2025-08-22"), 200),
      order(OrderStatus::Pending, None, 300),
    ];
    let visible = filter_orders(&orders, StatusFilter::All, Some(date("2025-08-20")));
    assert_eq!(visible.len(), 1);
    assert_eq!(visible[0].delivery_date, Some(date("2025-08-20")));
  }

  #[test]
  fn summary_all_row_counts_every_order() {
    let orders = vec![
      order(OrderStatus::Pending, None, 10000),
      order(OrderStatus::Completed, None, 25000),
    ];
    let summary = status_summaries(&orders);
    assert_eq!(summary[0].label, "All");
    assert_eq!(summary[0].count, 2);
    assert_eq!(summary[0].total_cents, 35000);

    let completed = summary.iter().find(|s| s.label == "Completed").expect("row");
    assert_eq!(completed.count, 1);
    assert_eq!(completed.total_cents, 25000);

    let cancelled = summary.iter().find(|s| s.label == "Cancelled").expect("row");
    assert_eq!(cancelled.count, 0);
    assert_eq!(cancelled.total_cents, 0);
  }

  #[test]
  fn grand_total_covers_filtered_set_only() {
    let orders = vec![
      order(OrderStatus::Pending, None, 10000),
      order(OrderStatus::Completed, None, 25000),
    ];
    let filtered = filter_orders(&orders, StatusFilter::All, None);
    assert_eq!(grand_total_cents(&filtered), 10000);
  }

  #[test]
  fn upcoming_excludes_closed_orders_even_inside_window() {
    let today = date("2025-08-18");
    let orders = vec![
      order(OrderStatus::Pending, Some("2025-08-20"), 100),
      order(OrderStatus::Completed, Some("2025-08-20"), 200),
      order(OrderStatus::Cancelled, Some("2025-08-21"), 300),
    ];
    let upcoming = upcoming_deliveries(&orders, today);
    assert_eq!(upcoming.len(), 1);
    assert_eq!(upcoming[0].status, OrderStatus::Pending);
  }

  #[test]
  fn upcoming_is_sorted_ascending_by_date() {
    let today = date("2025-08-18");
    let orders = vec![
      order(OrderStatus::Pending, Some("2025-08-22"), 100),
      order(OrderStatus::InProgress, Some("2025-08-20"), 200),
    ];
    let upcoming = upcoming_deliveries(&orders, today);
    let dates: Vec<_> = upcoming.iter().map(|o| o.delivery_date.expect("date")).collect();
    assert_eq!(dates, vec![date("2025-08-20"), date("2025-08-22")]);
  }

  #[test]
  fn upcoming_window_is_inclusive_of_both_ends() {
    let today = date("2025-08-18");
    let orders = vec![
      order(OrderStatus::Pending, Some("2025-08-18"), 100),
      order(OrderStatus::Pending, Some("2025-08-25"), 200),
      order(OrderStatus::Pending, Some("2025-08-26"), 300),
      order(OrderStatus::Pending, Some("2025-08-17"), 400),
      order(OrderStatus::Pending, None, 500),
    ];
    let upcoming = upcoming_deliveries(&orders, today);
    let dates: Vec<_> = upcoming.iter().map(|o| o.delivery_date.expect("date")).collect();
    assert_eq!(dates, vec![date("2025-08-18"), date("2025-08-25")]);
  }

  #[test]
  fn copy_confirmation_expires_after_the_window() {
    let id = Uuid::new_v4();
    let at = Instant::now();
    let last = Some((id, at));
    assert!(copy_confirmation_active(&last, id, at + Duration::from_millis(500)));
    assert!(!copy_confirmation_active(&last, id, at + Duration::from_secs(3)));
    assert!(!copy_confirmation_active(&last, Uuid::new_v4(), at));
    assert!(!copy_confirmation_active(&None, id, at));
  }

  #[test]
  fn status_filter_labels_round_trip() {
    assert_eq!(StatusFilter::from_label("All"), Some(StatusFilter::All));
    assert_eq!(
      StatusFilter::from_label("In Progress"),
      Some(StatusFilter::Status(OrderStatus::InProgress))
    );
    assert_eq!(StatusFilter::from_label("Done"), None);
  }
}
