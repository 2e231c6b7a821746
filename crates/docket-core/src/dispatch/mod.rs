//! Positional dispatch surface.
//!
//! One entry point maps a wire operation name and positional string
//! arguments onto the entity operations. Arity is checked before any
//! semantic processing; numeric arguments are decimal text and list
//! arguments are comma-separated. Responses are JSON bytes; mutations whose
//! contract has nothing to say return an empty body.


use crate::{
    db::{
        Context,
        query::{LookupPage, LookupResponse},
        store,
    },
    entity::{order, receipt, registry, worker},
    error::{Error, ValidationError},
    ledger::Ledger,
};

/// Execute one invocation.
pub fn dispatch<L: Ledger>(
    ctx: &mut Context<'_, L>,
    op: &str,
    args: &[String],
) -> Result<Vec<u8>, Error> {
    match op {
        "registryAdd" => {
            expect_arity("registryAdd", 4, args)?;
            registry::add(ctx, &args[0], &args[1], &args[2], list(&args[3]))?;
            Ok(Vec::new())
        }
        "registryUpdate" => {
            expect_arity("registryUpdate", 4, args)?;
            registry::update(ctx, &args[0], &args[1], &args[2], list(&args[3]))?;
            Ok(Vec::new())
        }
        "registrySetStatus" => {
            expect_arity("registrySetStatus", 2, args)?;
            let status = numeric("status", &args[1])?.try_into()?;
            registry::set_status(ctx, &args[0], status)
        }
        "registryLookUp" => {
            expect_arity("registryLookUp", 1, args)?;
            lookup_body(registry::lookup(ctx, &args[0], "")?)
        }
        "registryLookUpNext" => {
            expect_arity("registryLookUpNext", 2, args)?;
            lookup_body(registry::lookup(ctx, &args[0], &args[1])?)
        }
        "registryRetrieve" => {
            expect_arity("registryRetrieve", 1, args)?;
            registry::retrieve(ctx, &args[0])
        }

        "workerRegister" => {
            expect_arity("workerRegister", 5, args)?;
            let worker_type = numeric("workerType", &args[1])?;
            worker::register(ctx, &args[0], worker_type, &args[2], list(&args[3]), &args[4])?;
            Ok(Vec::new())
        }
        "workerUpdate" => {
            expect_arity("workerUpdate", 2, args)?;
            worker::update(ctx, &args[0], &args[1])
        }
        "workerSetStatus" => {
            expect_arity("workerSetStatus", 2, args)?;
            let status = numeric("status", &args[1])?.try_into()?;
            worker::set_status(ctx, &args[0], status)
        }
        "workerLookUp" => {
            expect_arity("workerLookUp", 3, args)?;
            lookup_body(worker::lookup(ctx, &args[0], &args[1], &args[2], "")?)
        }
        "workerLookUpNext" => {
            expect_arity("workerLookUpNext", 4, args)?;
            lookup_body(worker::lookup(ctx, &args[0], &args[1], &args[2], &args[3])?)
        }
        "workerRetrieve" => {
            expect_arity("workerRetrieve", 1, args)?;
            worker::retrieve(ctx, &args[0])
        }

        "workOrderSubmit" => {
            expect_arity("workOrderSubmit", 4, args)?;
            order::submit(ctx, &args[0], &args[1], &args[2], &args[3])?;
            Ok(Vec::new())
        }
        "workOrderComplete" => {
            expect_arity("workOrderComplete", 2, args)?;
            order::complete(ctx, &args[0], &args[1])?;
            Ok(Vec::new())
        }
        "workOrderGet" => {
            expect_arity("workOrderGet", 1, args)?;
            order::get(ctx, &args[0])
        }

        "workOrderReceiptCreate" => {
            expect_arity("workOrderReceiptCreate", 6, args)?;
            let create = receipt::ReceiptCreate {
                work_order_id: args[0].clone(),
                worker_id: args[1].clone(),
                worker_service_id: args[2].clone(),
                requester_id: args[3].clone(),
                receipt_create_status: numeric("receiptCreateStatus", &args[4])?,
                work_order_request_hash: args[5].clone(),
            };
            receipt::create(ctx, create)?;
            Ok(Vec::new())
        }
        "workOrderReceiptUpdate" => {
            expect_arity("workOrderReceiptUpdate", 6, args)?;
            let update = receipt::ReceiptUpdate {
                updater_id: args[1].clone(),
                update_type: numeric("updateType", &args[2])?,
                update_data: args[3].clone(),
                update_signature: args[4].clone(),
                signature_rules: args[5].clone(),
            };
            receipt::update(ctx, &args[0], update)?;
            Ok(Vec::new())
        }
        "workOrderReceiptLookUp" => {
            expect_arity("workOrderReceiptLookUp", 4, args)?;
            lookup_body(receipt::lookup(
                ctx, &args[0], &args[1], &args[2], &args[3], "",
            )?)
        }
        "workOrderReceiptLookUpNext" => {
            expect_arity("workOrderReceiptLookUpNext", 5, args)?;
            lookup_body(receipt::lookup(
                ctx, &args[0], &args[1], &args[2], &args[3], &args[4],
            )?)
        }
        "workOrderReceiptRetrieve" => {
            expect_arity("workOrderReceiptRetrieve", 1, args)?;
            receipt::retrieve(ctx, &args[0])
        }
        "workOrderReceiptUpdateRetrieve" => {
            expect_arity("workOrderReceiptUpdateRetrieve", 3, args)?;
            let update_index = numeric("updateIndex", &args[2])?;
            receipt::update_retrieve(ctx, &args[0], &args[1], update_index)
        }

        other => Err(ValidationError::UnknownOperation(other.to_string()).into()),
    }
}

fn expect_arity(op: &'static str, expected: usize, args: &[String]) -> Result<(), ValidationError> {
    if args.len() == expected {
        Ok(())
    } else {
        Err(ValidationError::Arity {
            op,
            expected,
            received: args.len(),
        })
    }
}

fn numeric(field: &'static str, raw: &str) -> Result<u64, ValidationError> {
    raw.parse().map_err(|_| ValidationError::NotNumeric { field })
}

/// Comma-separated list argument. Empty elements are dropped, so an empty
/// argument is an empty list.
fn list(raw: &str) -> Vec<String> {
    raw.split(',')
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

fn lookup_body(page: LookupPage) -> Result<Vec<u8>, Error> {
    store::encode("lookup", &LookupResponse::from(page))
}
