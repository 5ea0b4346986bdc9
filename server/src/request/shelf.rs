use application::transfer::{ShelfOperation, ShelfRequest};
use serde::Deserialize;

use crate::controller::Intake;

pub static OP_PARAM: &str = "op";
pub static ADD_OP: &str = "add";
pub static MOD_OP: &str = "mod";
pub static DEL_OP: &str = "del";

#[derive(Debug, Default, Deserialize)]
pub struct ShelfQuery {
    id: Option<String>,
}

/// Fields posted by the add, modify and delete forms. Absent fields read as empty.
#[derive(Debug, Default, Deserialize)]
pub struct ShelfForm {
    op: Option<String>,
    #[serde(default)]
    id: String,
    #[serde(default)]
    title: String,
    #[serde(default)]
    author: String,
    #[serde(default)]
    description: String,
}

pub struct ShelfTransformer;

impl Intake<ShelfQuery> for ShelfTransformer {
    type To = ShelfRequest;
    fn emit(&self, input: ShelfQuery) -> Self::To {
        self.emit((input, ShelfForm::default()))
    }
}

impl Intake<(ShelfQuery, ShelfForm)> for ShelfTransformer {
    type To = ShelfRequest;
    fn emit(&self, input: (ShelfQuery, ShelfForm)) -> Self::To {
        let (query, form) = input;
        if let Some(id) = query.id {
            return ShelfRequest::Detail { id };
        }
        let Some(op) = form.op else {
            return ShelfRequest::List;
        };
        let operation = if op == ADD_OP {
            ShelfOperation::Add {
                title: form.title,
                author: form.author,
                description: form.description,
            }
        } else if op == MOD_OP {
            ShelfOperation::Modify {
                id: form.id,
                title: form.title,
                author: form.author,
                description: form.description,
            }
        } else if op == DEL_OP {
            ShelfOperation::Delete { id: form.id }
        } else {
            ShelfOperation::Unknown(op)
        };
        ShelfRequest::Mutate(operation)
    }
}
