//! In-memory demo resources.

use resource_dispatch::{
    async_trait, AcceptsInput, AppError, InputFiller, RequestSource, ResourceContext, ResourceOutcome,
    ResourceRegistry, ResourceResult, RestResource,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct OrderInput {
    pub name: String,
    pub qty: i64,
}

#[derive(Clone, Debug, Serialize)]
pub struct OrderRecord {
    pub id: u64,
    pub name: String,
    pub qty: i64,
}

#[derive(Default)]
struct OrderTable {
    next_id: u64,
    rows: BTreeMap<u64, OrderRecord>,
}

/// Orders survive across requests; each request gets its own `Orders` handle.
#[derive(Clone, Default)]
pub struct OrderStore(Arc<Mutex<OrderTable>>);

pub struct Orders {
    store: OrderStore,
    input: OrderInput,
}

impl Orders {
    pub fn new(store: OrderStore) -> Self {
        Self {
            store,
            input: OrderInput::default(),
        }
    }

    fn parse_id(ctx: &ResourceContext) -> Result<u64, ResourceOutcome> {
        let raw = ctx
            .id
            .as_deref()
            .ok_or_else(|| ResourceOutcome::error(400, "order id is required"))?;
        raw.parse()
            .map_err(|_| ResourceOutcome::error(400, format!("invalid order id '{}'", raw)))
    }

    fn table(&self) -> Result<std::sync::MutexGuard<'_, OrderTable>, ResourceOutcome> {
        self.store
            .0
            .lock()
            .map_err(|_| ResourceOutcome::error(500, "order store poisoned"))
    }

    fn write(&self, id: u64) -> Result<OrderRecord, ResourceOutcome> {
        let mut table = self.table()?;
        let record = OrderRecord {
            id,
            name: self.input.name.clone(),
            qty: self.input.qty,
        };
        table.rows.insert(id, record.clone());
        Ok(record)
    }
}

fn into_result(r: Result<ResourceOutcome, ResourceOutcome>) -> ResourceResult {
    match r {
        Ok(outcome) | Err(outcome) => outcome.into(),
    }
}

fn to_body<T: Serialize>(value: &T) -> Value {
    serde_json::to_value(value).unwrap_or(Value::Null)
}

impl Orders {
    fn list(&self) -> Result<ResourceOutcome, ResourceOutcome> {
        let table = self.table()?;
        let rows: Vec<&OrderRecord> = table.rows.values().collect();
        Ok(ResourceOutcome::ok(to_body(&rows)))
    }

    fn find(&self, ctx: &ResourceContext) -> Result<ResourceOutcome, ResourceOutcome> {
        let id = Self::parse_id(ctx)?;
        let table = self.table()?;
        table
            .rows
            .get(&id)
            .map(|r| ResourceOutcome::ok(to_body(r)))
            .ok_or_else(|| not_found(id))
    }

    fn insert(&self) -> Result<ResourceOutcome, ResourceOutcome> {
        if self.input.name.is_empty() {
            return Err(ResourceOutcome::error(422, "name is required"));
        }
        let id = {
            let mut table = self.table()?;
            table.next_id += 1;
            table.next_id
        };
        let record = self.write(id)?;
        Ok(ResourceOutcome::created(to_body(&record)))
    }

    fn replace(&self, ctx: &ResourceContext) -> Result<ResourceOutcome, ResourceOutcome> {
        let id = Self::parse_id(ctx)?;
        let exists = self.table()?.rows.contains_key(&id);
        if !exists {
            return Err(not_found(id));
        }
        let record = self.write(id)?;
        Ok(ResourceOutcome::ok(to_body(&record)))
    }

    fn remove(&self, ctx: &ResourceContext) -> Result<ResourceOutcome, ResourceOutcome> {
        let id = Self::parse_id(ctx)?;
        let removed = self.table()?.rows.remove(&id);
        removed
            .map(|r| ResourceOutcome::ok(to_body(&r)))
            .ok_or_else(|| not_found(id))
    }

    fn put(&self, ctx: &ResourceContext) -> Result<ResourceOutcome, ResourceOutcome> {
        let id = Self::parse_id(ctx)?;
        let existed = self.table()?.rows.contains_key(&id);
        let record = self.write(id)?;
        Ok(if existed {
            ResourceOutcome::ok(to_body(&record))
        } else {
            ResourceOutcome::created(to_body(&record))
        })
    }
}

fn not_found(id: u64) -> ResourceOutcome {
    ResourceOutcome::error(404, format!("order {} not found", id))
}

#[async_trait]
impl RestResource for Orders {
    async fn index(&mut self, _: &ResourceContext) -> ResourceResult {
        into_result(self.list())
    }

    async fn view(&mut self, ctx: &ResourceContext) -> ResourceResult {
        into_result(self.find(ctx))
    }

    async fn create(&mut self, _: &ResourceContext) -> ResourceResult {
        into_result(self.insert())
    }

    async fn update(&mut self, ctx: &ResourceContext) -> ResourceResult {
        into_result(self.replace(ctx))
    }

    async fn delete(&mut self, ctx: &ResourceContext) -> ResourceResult {
        into_result(self.remove(ctx))
    }

    async fn upsert(&mut self, ctx: &ResourceContext) -> ResourceResult {
        into_result(self.put(ctx))
    }
}

impl AcceptsInput for Orders {
    type Input = OrderInput;

    fn set_input_data(&mut self, input: OrderInput) {
        self.input = input;
    }
}

/// Read-only catalog, registered under the nested `catalog/Product/Product` path.
pub struct Products;

const PRODUCTS: &[(&str, &str)] = &[("p-1", "Widget"), ("p-2", "Gadget")];

fn not_allowed() -> ResourceResult {
    ResourceOutcome::error(405, "catalog is read-only").into()
}

#[async_trait]
impl RestResource for Products {
    async fn index(&mut self, _: &ResourceContext) -> ResourceResult {
        let items: Vec<Value> = PRODUCTS.iter().map(|(id, name)| json!({"id": id, "name": name})).collect();
        Value::Array(items).into()
    }

    async fn view(&mut self, ctx: &ResourceContext) -> ResourceResult {
        let id = ctx.id.as_deref().unwrap_or_default();
        match PRODUCTS.iter().find(|(pid, _)| *pid == id) {
            Some((id, name)) => json!({"id": id, "name": name}).into(),
            None => ResourceOutcome::error(404, format!("product '{}' not found", id)).into(),
        }
    }

    async fn create(&mut self, _: &ResourceContext) -> ResourceResult {
        not_allowed()
    }

    async fn update(&mut self, _: &ResourceContext) -> ResourceResult {
        not_allowed()
    }

    async fn delete(&mut self, _: &ResourceContext) -> ResourceResult {
        not_allowed()
    }

    async fn upsert(&mut self, _: &ResourceContext) -> ResourceResult {
        not_allowed()
    }
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct SearchInput {
    pub terms: Vec<String>,
}

/// Splits the `q` query parameter on whitespace; default binding cannot produce a list from it.
pub struct SearchFiller;

impl InputFiller<SearchInput> for SearchFiller {
    fn fill(&self, input: &mut SearchInput, source: RequestSource<'_>) -> Result<(), AppError> {
        input.terms = source
            .query
            .get("q")
            .map(|q| q.split_whitespace().map(str::to_lowercase).collect())
            .unwrap_or_default();
        Ok(())
    }
}

pub struct ProductSearch {
    input: SearchInput,
}

#[async_trait]
impl RestResource for ProductSearch {
    async fn index(&mut self, _: &ResourceContext) -> ResourceResult {
        let hits: Vec<Value> = PRODUCTS
            .iter()
            .filter(|(_, name)| {
                let name = name.to_lowercase();
                self.input.terms.iter().any(|t| name.contains(t.as_str()))
            })
            .map(|(id, name)| json!({"id": id, "name": name}))
            .collect();
        Value::Array(hits).into()
    }

    async fn view(&mut self, _: &ResourceContext) -> ResourceResult {
        not_allowed()
    }

    async fn create(&mut self, _: &ResourceContext) -> ResourceResult {
        not_allowed()
    }

    async fn update(&mut self, _: &ResourceContext) -> ResourceResult {
        not_allowed()
    }

    async fn delete(&mut self, _: &ResourceContext) -> ResourceResult {
        not_allowed()
    }

    async fn upsert(&mut self, _: &ResourceContext) -> ResourceResult {
        not_allowed()
    }
}

impl AcceptsInput for ProductSearch {
    type Input = SearchInput;

    fn set_input_data(&mut self, input: SearchInput) {
        self.input = input;
    }
}

/// Registry with every demo resource.
pub fn demo_registry() -> ResourceRegistry {
    let orders = OrderStore::default();
    let mut registry = ResourceRegistry::new();
    registry
        .register_with_input("shop/Order", move || Orders::new(orders.clone()))
        .register("catalog/Product/Product", || Products)
        .register_with_input("catalog/Search", || ProductSearch {
            input: SearchInput::default(),
        })
        .register_filler::<SearchInput, _>(SearchFiller);
    registry
}
