//! Page driver - infrastructure layer
//!
//! Holds the single `Page` resource and exposes element-level
//! capabilities: navigate, wait, read markup, click, type. It knows
//! nothing about reports or tables.
//!
//! Portal element ids contain `:` separators, so elements are addressed
//! with attribute selectors rather than `#id` syntax. Waits are
//! explicit condition polls with bounded deadlines - no fixed settle
//! sleeps.

use std::time::Duration;

use chromiumoxide::error::CdpError;
use chromiumoxide::{Element, Page};
use serde_json::Value as JsonValue;
use tokio::time::{sleep, Instant};

use crate::error::{BrowserError, ExtractionError, Result};

const POLL_INTERVAL: Duration = Duration::from_millis(250);

pub struct PageDriver {
    page: Page,
}

impl PageDriver {
    pub fn new(page: Page) -> Self {
        Self { page }
    }

    pub fn page(&self) -> &Page {
        &self.page
    }

    fn id_selector(id: &str) -> String {
        format!(r#"[id="{id}"]"#)
    }

    /// Navigates and waits for the load to complete, bounded by the
    /// page-load timeout.
    pub async fn goto(&self, url: &str, timeout: Duration) -> Result<()> {
        let navigation = async {
            self.page.goto(url).await?;
            self.page.wait_for_navigation().await?;
            Ok::<(), CdpError>(())
        };
        tokio::time::timeout(timeout, navigation)
            .await
            .map_err(|_| BrowserError::WaitTimeout {
                target: url.to_string(),
                timeout,
            })?
            .map_err(|source| BrowserError::Navigation {
                url: url.to_string(),
                source,
            })?;
        Ok(())
    }

    /// Navigates back through the session history.
    pub async fn go_back(&self) -> Result<()> {
        self.eval("history.back()").await?;
        Ok(())
    }

    pub async fn find_by_id(&self, id: &str) -> Result<Element> {
        let selector = Self::id_selector(id);
        self.page
            .find_element(selector.clone())
            .await
            .map_err(|_| ExtractionError::ElementNotFound { selector }.into())
    }

    pub async fn find_all(&self, selector: &str) -> Result<Vec<Element>> {
        Ok(self
            .page
            .find_elements(selector)
            .await
            .unwrap_or_default())
    }

    /// Polls for an element until it is present or the deadline passes.
    pub async fn wait_for_id(&self, id: &str, timeout: Duration) -> Result<Element> {
        let deadline = Instant::now() + timeout;
        loop {
            if let Ok(element) = self.page.find_element(Self::id_selector(id)).await {
                return Ok(element);
            }
            if Instant::now() >= deadline {
                return Err(BrowserError::WaitTimeout {
                    target: id.to_string(),
                    timeout,
                }
                .into());
            }
            sleep(POLL_INTERVAL).await;
        }
    }

    /// Outer HTML of the element with the given id.
    pub async fn outer_html(&self, id: &str) -> Result<String> {
        let element = self.find_by_id(id).await?;
        let html = element
            .outer_html()
            .await
            .map_err(BrowserError::Cdp)?
            .ok_or_else(|| ExtractionError::MissingMarkup { id: id.to_string() })?;
        Ok(html)
    }

    /// Polls an element's outer HTML until two consecutive reads agree,
    /// bounding client-side re-render races after tab activation. Falls
    /// back to the last read if the deadline passes with one in hand.
    pub async fn wait_for_stable_html(&self, id: &str, timeout: Duration) -> Result<String> {
        let deadline = Instant::now() + timeout;
        let mut previous: Option<String> = None;
        loop {
            if let Ok(html) = self.outer_html(id).await {
                if previous.as_deref() == Some(html.as_str()) {
                    return Ok(html);
                }
                previous = Some(html);
            } else {
                previous = None;
            }

            if Instant::now() >= deadline {
                return previous.ok_or_else(|| {
                    BrowserError::WaitTimeout {
                        target: id.to_string(),
                        timeout,
                    }
                    .into()
                });
            }
            sleep(POLL_INTERVAL).await;
        }
    }

    /// Scrolls the element into view and clicks it.
    pub async fn click_by_id(&self, id: &str) -> Result<()> {
        let element = self.find_by_id(id).await?;
        element.scroll_into_view().await.map_err(BrowserError::Cdp)?;
        element.click().await.map_err(BrowserError::Cdp)?;
        Ok(())
    }

    /// Waits for an input, focuses it with a click and types the text.
    pub async fn type_into(&self, id: &str, text: &str, timeout: Duration) -> Result<()> {
        let element = self.wait_for_id(id, timeout).await?;
        element.click().await.map_err(BrowserError::Cdp)?;
        element.type_str(text).await.map_err(BrowserError::Cdp)?;
        Ok(())
    }

    /// Resolves an element by XPath in-page and clicks it. The portal's
    /// search button has no stable id and is only reachable through its
    /// label text.
    pub async fn click_xpath(&self, xpath: &str) -> Result<()> {
        let script = format!(
            r#"(() => {{
                const node = document
                    .evaluate({xpath}, document, null, XPathResult.FIRST_ORDERED_NODE_TYPE, null)
                    .singleNodeValue;
                if (!node) return false;
                node.scrollIntoView(true);
                node.click();
                return true;
            }})()"#,
            xpath = JsonValue::String(xpath.to_string()),
        );
        let clicked = self.eval(script).await?;
        if clicked.as_bool() != Some(true) {
            return Err(ExtractionError::ElementNotFound {
                selector: xpath.to_string(),
            }
            .into());
        }
        Ok(())
    }

    /// Evaluates a script and returns its JSON result; statements with
    /// no value yield `null`.
    pub async fn eval(&self, script: impl Into<String>) -> Result<JsonValue> {
        let result = self
            .page
            .evaluate(script.into())
            .await
            .map_err(BrowserError::Cdp)?;
        Ok(result.into_value().unwrap_or(JsonValue::Null))
    }

    /// Trimmed text content of the first element matching a selector.
    pub async fn text_of(&self, selector: &str) -> Result<String> {
        let element = self
            .page
            .find_element(selector)
            .await
            .map_err(|_| ExtractionError::ElementNotFound {
                selector: selector.to_string(),
            })?;
        let text = element
            .inner_text()
            .await
            .map_err(BrowserError::Cdp)?
            .unwrap_or_default();
        Ok(text.trim().to_string())
    }
}
