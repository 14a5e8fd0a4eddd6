//! Live-update bridge for rendered chart instances
//!
//! A [`ChartProxy`] is the handle bound to one already-rendered chart. It
//! caches the column-role mapping (and merged options) from the original
//! build, and its update calls replay that mapping - overlaid with any
//! per-call overrides - against fresh data, emitting typed
//! [`UpdateMessage`]s across a [`Transport`].
//!
//! The proxy is a two-state machine: update calls on an **Unbound** proxy
//! are caller errors reported as `InvalidProxyState`, never silently
//! dropped; after [`ChartProxy::bind`] the proxy is **Bound** and updates
//! flow. Each proxy owns only its own cached record - nothing is shared
//! between instances.

mod message;

pub use crate::chart::resolve::RoleOverrides;
pub use message::{ClickEvent, UpdateMessage};

use polars::prelude::*;
use serde_json::Value;
use tracing::debug;
use uuid::Uuid;

use crate::chart::{dataset, merge, resolve, ChartConfig, ChartKind, ColumnRoles, Palette, ValueSpec};
use crate::frame;
use crate::{ChartError, Result};

/// Outbound edge of the rendering boundary.
///
/// Implementations deliver messages to the embedding layer (widget comm,
/// websocket, test buffer); the core does not care how they travel.
pub trait Transport {
    fn send(&mut self, message: &UpdateMessage) -> Result<()>;
}

/// A [`Transport`] that records messages in memory.
///
/// Used by the test suite and by embedders that drain and forward messages
/// in batches.
#[derive(Debug, Default)]
pub struct MemoryTransport {
    messages: Vec<UpdateMessage>,
}

impl MemoryTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Messages sent so far, in order.
    pub fn messages(&self) -> &[UpdateMessage] {
        &self.messages
    }

    /// Drain the recorded messages.
    pub fn take_messages(&mut self) -> Vec<UpdateMessage> {
        std::mem::take(&mut self.messages)
    }
}

impl Transport for MemoryTransport {
    fn send(&mut self, message: &UpdateMessage) -> Result<()> {
        self.messages.push(message.clone());
        Ok(())
    }
}

#[derive(Debug)]
struct BoundChart {
    kind: ChartKind,
    meta: ColumnRoles,
    options: Value,
}

#[derive(Debug)]
enum ProxyState {
    Unbound,
    Bound(BoundChart),
}

/// Handle for one rendered chart instance.
#[derive(Debug)]
pub struct ChartProxy<T: Transport> {
    /// Opaque instance identifier addressing the remote chart
    id: String,
    transport: T,
    palette: Palette,
    state: ProxyState,
}

impl<T: Transport> ChartProxy<T> {
    /// Create an unbound proxy with a generated instance id.
    pub fn new(transport: T) -> Self {
        let id = Uuid::new_v4().to_string().replace('-', "")[..12].to_string();
        Self::with_id(transport, id)
    }

    /// Create an unbound proxy under an id assigned by the embedding layer.
    pub fn with_id(transport: T, id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            transport,
            palette: Palette::default(),
            state: ProxyState::Unbound,
        }
    }

    /// Palette used when rebuilding datasets for data updates. Should match
    /// the palette the original configuration was built with.
    pub fn with_palette(mut self, palette: Palette) -> Self {
        self.palette = palette;
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// The underlying transport.
    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }

    pub fn is_bound(&self) -> bool {
        matches!(self.state, ProxyState::Bound(_))
    }

    /// The cached column-role mapping, once bound.
    pub fn meta(&self) -> Option<&ColumnRoles> {
        match &self.state {
            ProxyState::Bound(bound) => Some(&bound.meta),
            ProxyState::Unbound => None,
        }
    }

    /// The cached (merged) options tree, once bound.
    pub fn options(&self) -> Option<&Value> {
        match &self.state {
            ProxyState::Bound(bound) => Some(&bound.options),
            ProxyState::Unbound => None,
        }
    }

    /// Bind this proxy to a chart instance rendered from `config`, caching
    /// its column mapping and options for later updates.
    pub fn bind(&mut self, config: &ChartConfig) {
        debug!(id = %self.id, kind = config.kind.as_str(), "binding chart instance");
        self.state = ProxyState::Bound(BoundChart {
            kind: config.kind,
            meta: config.meta.clone(),
            options: config.options.clone(),
        });
    }

    fn bound_mut(&mut self) -> Result<&mut BoundChart> {
        match &mut self.state {
            ProxyState::Bound(bound) => Ok(bound),
            ProxyState::Unbound => Err(ChartError::InvalidProxyState(format!(
                "proxy '{}' has no bound chart instance; bind a built configuration first",
                self.id
            ))),
        }
    }

    /// Replace the rendered chart's data with a rebuild from `df`.
    ///
    /// Columns are re-resolved from the cached mapping overlaid with
    /// `overrides` (per-call wins, key by key), revalidated against the new
    /// frame, and rebuilt by the family dataset builder. Transmits
    /// `{id, data, meta}` - options are never part of a data update - and
    /// refreshes the cached mapping.
    pub fn update_data(&mut self, df: &DataFrame, overrides: Option<&RoleOverrides>) -> Result<()> {
        let (kind, cached) = {
            let bound = self.bound_mut()?;
            (bound.kind, bound.meta.clone())
        };
        frame::ensure_table(df)?;

        let requested = match overrides {
            Some(overrides) => cached.merged(overrides),
            None => cached,
        };
        let values = value_spec_from_roles(kind, &requested);
        let roles = resolve::resolve(df, requested.label.as_deref(), &values, kind)?;
        let data = dataset::build(df, &roles, kind, self.palette)?;

        self.bound_mut()?.meta = roles.clone();
        debug!(id = %self.id, rows = df.height(), "sending data update");
        self.transport.send(&UpdateMessage::UpdateData {
            id: self.id.clone(),
            data,
            meta: roles,
        })
    }

    /// Deep-merge an options delta into the cached tree and transmit only
    /// the delta for the remote side to apply.
    pub fn update_options(&mut self, options: &Value) -> Result<()> {
        {
            let bound = self.bound_mut()?;
            bound.options = merge::merge(&bound.options, options);
        }
        self.transport.send(&UpdateMessage::UpdateOptions {
            id: self.id.clone(),
            options: options.clone(),
        })
    }

    /// Pass a caller-supplied dataset through to the rendered chart as-is.
    pub fn add_dataset(&mut self, dataset: Value) -> Result<()> {
        self.bound_mut()?;
        self.transport.send(&UpdateMessage::AddDataset {
            id: self.id.clone(),
            dataset,
        })
    }

    /// Ask the rendered chart to drop the dataset at `index`. An index past
    /// the end is ignored by the remote side, not reported here.
    pub fn remove_dataset(&mut self, index: usize) -> Result<()> {
        self.bound_mut()?;
        self.transport.send(&UpdateMessage::RemoveDataset {
            id: self.id.clone(),
            index,
        })
    }
}

/// Reconstruct the value spec a role mapping came from, so updates run the
/// same validation path as the original build.
fn value_spec_from_roles(kind: ChartKind, roles: &ColumnRoles) -> ValueSpec {
    if kind == ChartKind::Bubble {
        if let (Some(radius), Some(value)) = (&roles.radius, roles.values.first()) {
            return ValueSpec::Bubble {
                value: value.clone(),
                radius: radius.clone(),
                group: roles.group.clone(),
            };
        }
    }
    ValueSpec::Columns(roles.values.clone())
}
