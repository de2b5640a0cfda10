use taskpad_model::{
  PreferenceStorage,
  ThemeMode
};

fn local_storage()
-> Option<web_sys::Storage> {
  web_sys::window().and_then(
    |window| {
      window
        .local_storage()
        .ok()
        .flatten()
    }
  )
}

/// `window.localStorage`; reads and
/// writes are best effort.
#[derive(Clone, Copy, Default)]
pub(crate) struct BrowserStorage;

impl PreferenceStorage
  for BrowserStorage
{
  fn get_item(
    &self,
    key: &str
  ) -> Option<String> {
    local_storage().and_then(
      |storage| {
        storage
          .get_item(key)
          .ok()
          .flatten()
      }
    )
  }

  fn set_item(
    &mut self,
    key: &str,
    value: &str
  ) {
    let Some(storage) = local_storage()
    else {
      tracing::warn!(
        key,
        "local storage unavailable; \
         preference not saved"
      );
      return;
    };

    if let Err(error) =
      storage.set_item(key, value)
    {
      tracing::error!(
        ?error,
        key,
        "failed writing preference \
         to local storage"
      );
    }
  }
}

pub(crate) fn system_prefers_dark()
-> bool {
  web_sys::window()
    .and_then(|window| {
      window
        .match_media(
          "(prefers-color-scheme: \
           dark)"
        )
        .ok()
        .flatten()
    })
    .map(|query| query.matches())
    .unwrap_or(false)
}

/// Mirrors the theme onto `<html>` so
/// page-level styles can key off
/// `.dark`.
pub(crate) fn apply_document_theme(
  theme: ThemeMode
) {
  let root = web_sys::window()
    .and_then(|window| {
      window.document()
    })
    .and_then(|document| {
      document.document_element()
    });

  if let Some(root) = root
    && let Err(error) = root
      .class_list()
      .toggle_with_force(
        "dark",
        theme.is_dark()
      )
  {
    tracing::warn!(
      ?error,
      "failed toggling document \
       theme class"
    );
  }
}
