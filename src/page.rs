//! Page setup: mounts the configured widgets through an explicit document handle.

use tally_ui::{Counter, CounterOptions, Dom, Spinner};

use crate::config::PageConfig;
use crate::error::Result;

/// A counter together with the selector it was mounted at
#[derive(Debug)]
pub struct MountedCounter<D: Dom> {
    pub container: String,
    pub counter: Counter<D>,
}

/// Widgets mounted by [`mount_page`]
#[derive(Debug)]
pub struct Page<D: Dom> {
    counters: Vec<MountedCounter<D>>,
    spinner: Option<Spinner<D>>,
}

impl<D: Dom> Page<D> {
    pub fn counters(&self) -> &[MountedCounter<D>] {
        &self.counters
    }

    /// Counter mounted at `container`
    pub fn counter(&self, container: &str) -> Option<&Counter<D>> {
        self.counters
            .iter()
            .find(|m| m.container == container)
            .map(|m| &m.counter)
    }

    pub fn counter_mut(&mut self, container: &str) -> Option<&mut Counter<D>> {
        self.counters
            .iter_mut()
            .find(|m| m.container == container)
            .map(|m| &mut m.counter)
    }

    pub fn spinner(&self) -> Option<&Spinner<D>> {
        self.spinner.as_ref()
    }

    pub fn spinner_mut(&mut self) -> Option<&mut Spinner<D>> {
        self.spinner.as_mut()
    }

    pub fn into_parts(self) -> (Vec<MountedCounter<D>>, Option<Spinner<D>>) {
        (self.counters, self.spinner)
    }

    /// Detach every mounted widget.
    pub fn destroy(&mut self, dom: &mut D) -> Result<()> {
        for mounted in &mut self.counters {
            mounted.counter.destroy(dom)?;
        }
        if let Some(spinner) = &mut self.spinner {
            spinner.destroy(dom)?;
        }
        Ok(())
    }
}

/// Mount every widget described by `config` into `dom`.
///
/// Containers are resolved through `dom` only. If any widget fails to mount, the
/// ones already mounted are destroyed again before the error is returned.
pub fn mount_page<D: Dom>(dom: &mut D, config: &PageConfig) -> Result<Page<D>> {
    let mut page = Page {
        counters: Vec::with_capacity(config.counters.len()),
        spinner: None,
    };

    let result = mount_into(dom, config, &mut page);
    if let Err(e) = result {
        log::error!("Page setup failed: {}", e);
        if let Err(cleanup) = page.destroy(dom) {
            log::warn!("Failed to undo partial page setup: {}", cleanup);
        }
        return Err(e);
    }

    log::info!(
        "Mounted {} counter(s){}",
        page.counters.len(),
        if page.spinner.is_some() { " and a spinner" } else { "" }
    );
    Ok(page)
}

fn mount_into<D: Dom>(dom: &mut D, config: &PageConfig, page: &mut Page<D>) -> Result<()> {
    for mount in &config.counters {
        let counter = Counter::from_selector(dom, &mount.container, mount.options.clone())?;
        log::debug!("Counter mounted at '{}'", mount.container);
        page.counters.push(MountedCounter {
            container: mount.container.clone(),
            counter,
        });
    }

    if let Some(mount) = &config.spinner {
        page.spinner = Some(Spinner::new(dom, &mount.container, mount.options.clone())?);
        log::debug!("Spinner mounted at '{}'", mount.container);
    }
    Ok(())
}

/// Mount counters into already resolved container handles.
pub fn mount_counters<D, I>(dom: &mut D, mounts: I) -> Result<Vec<Counter<D>>>
where
    D: Dom,
    I: IntoIterator<Item = (D::Node, CounterOptions)>,
{
    let mut counters = Vec::new();
    for (container, options) in mounts {
        match Counter::new(dom, container, options) {
            Ok(counter) => counters.push(counter),
            Err(e) => {
                for counter in &mut counters {
                    if let Err(cleanup) = counter.destroy(dom) {
                        log::warn!("Failed to undo partial counter setup: {}", cleanup);
                    }
                }
                return Err(e.into());
            }
        }
    }
    Ok(counters)
}
