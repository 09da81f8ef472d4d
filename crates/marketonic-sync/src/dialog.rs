//! # Dialogs
//!
//! Open/closed state of the two editing dialogs and the draft each one owns.
//!
//! ```text
//!                 open_new()                 open_edit(product)
//!   ┌────────┐ ─────────────► ┌──────────┐   ┌─────────────────┐
//!   │ Closed │                │ Creating │   │ Editing(id)     │
//!   └────────┘ ◄───────────── └──────────┘   └─────────────────┘
//!        ▲          close()                          │
//!        └───────────────────────────────────────────┘
//!                            close()
//! ```
//!
//! Opening resets or seeds the draft. Closing discards it.

use marketonic_core::{CategoryDraft, Product, ProductDraft};

/// Which product, if any, the product dialog is working on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProductDialogMode {
    #[default]
    Closed,
    Creating,
    Editing(i64),
}

/// The "new / edit product" dialog.
#[derive(Debug, Clone, Default)]
pub struct ProductDialog {
    mode: ProductDialogMode,
    draft: ProductDraft,
}

impl ProductDialog {
    pub fn open_new(&mut self) -> &mut ProductDraft {
        self.mode = ProductDialogMode::Creating;
        self.draft.reset();
        &mut self.draft
    }

    pub fn open_edit(&mut self, product: &Product) -> &mut ProductDraft {
        self.mode = ProductDialogMode::Editing(product.id);
        self.draft = ProductDraft::from_product(product);
        &mut self.draft
    }

    pub fn close(&mut self) {
        self.mode = ProductDialogMode::Closed;
        self.draft.reset();
    }

    pub fn mode(&self) -> ProductDialogMode {
        self.mode
    }

    pub fn is_open(&self) -> bool {
        self.mode != ProductDialogMode::Closed
    }

    /// Id of the product being edited.
    pub fn editing_id(&self) -> Option<i64> {
        match self.mode {
            ProductDialogMode::Editing(id) => Some(id),
            _ => None,
        }
    }

    pub fn draft(&self) -> &ProductDraft {
        &self.draft
    }

    /// The draft, while the dialog is open.
    pub fn draft_mut(&mut self) -> Option<&mut ProductDraft> {
        if self.is_open() {
            Some(&mut self.draft)
        } else {
            None
        }
    }
}

/// The "new category" dialog.
#[derive(Debug, Clone, Default)]
pub struct CategoryDialog {
    open: bool,
    draft: CategoryDraft,
}

impl CategoryDialog {
    pub fn open(&mut self) -> &mut CategoryDraft {
        self.open = true;
        self.draft.reset();
        &mut self.draft
    }

    pub fn close(&mut self) {
        self.open = false;
        self.draft.reset();
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn draft(&self) -> &CategoryDraft {
        &self.draft
    }

    pub fn draft_mut(&mut self) -> Option<&mut CategoryDraft> {
        if self.open {
            Some(&mut self.draft)
        } else {
            None
        }
    }
}
