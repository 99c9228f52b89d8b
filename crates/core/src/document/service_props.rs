//! Property-based tests for the document lifecycle service.

use proptest::prelude::*;
use rust_decimal::Decimal;
use std::collections::HashSet;
use std::sync::Arc;

use faktura_shared::{Currency, CustomerId, TenantId};

use crate::numbering::InMemoryNumberingStore;
use crate::store::{InMemoryDocumentStore, InMemoryPaymentStore};
use crate::tenant::{StaticTenantSettings, TaxConfig, TenantProfile};

use super::service::DocumentService;
use super::transition;
use super::types::{
    CreateDocumentInput, Document, DocumentStatus, DocumentType, InitialStatus, LineItemInput,
    PaymentTerms, SendDetails,
};

type PropService = DocumentService<
    Arc<InMemoryDocumentStore>,
    Arc<InMemoryNumberingStore>,
    Arc<StaticTenantSettings>,
    Arc<InMemoryPaymentStore>,
>;

fn service() -> (PropService, TenantId) {
    let settings = Arc::new(StaticTenantSettings::new());
    let tenant = TenantId::new();
    settings.insert(
        tenant,
        TenantProfile {
            currency: Currency::Usd,
            tax: TaxConfig::disabled(),
        },
    );
    let service = DocumentService::new(
        Arc::new(InMemoryDocumentStore::new()),
        Arc::new(InMemoryNumberingStore::new()),
        settings,
        Arc::new(InMemoryPaymentStore::new()),
    );
    (service, tenant)
}

fn create_input(
    tenant: TenantId,
    document_type: DocumentType,
    initial_status: InitialStatus,
) -> CreateDocumentInput {
    CreateDocumentInput {
        tenant_id: tenant,
        customer_id: CustomerId::new(),
        document_type,
        initial_status,
        currency: None,
        payment_terms: PaymentTerms::Net30,
        custom_net_days: None,
        line_items: vec![LineItemInput {
            description: "item".to_string(),
            quantity: Decimal::ONE,
            unit_price: Decimal::ONE_HUNDRED,
            discount_percent: Decimal::ZERO,
            product_id: None,
        }],
        recurring: None,
        scheduled_send: None,
    }
}

fn arb_document_type() -> impl Strategy<Value = DocumentType> {
    prop_oneof![Just(DocumentType::Invoice), Just(DocumentType::Quote)]
}

fn arb_initial_status() -> impl Strategy<Value = InitialStatus> {
    prop_oneof![Just(InitialStatus::Draft), Just(InitialStatus::Issued)]
}

/// A lifecycle operation picked at random against a live document.
#[derive(Debug, Clone, Copy)]
enum Op {
    Issue,
    Send,
    Archive,
    ExportPdf,
}

fn arb_op() -> impl Strategy<Value = Op> {
    prop_oneof![
        Just(Op::Issue),
        Just(Op::Send),
        Just(Op::Archive),
        Just(Op::ExportPdf),
    ]
}

fn send_details() -> SendDetails {
    SendDetails {
        to_email: "customer@example.com".to_string(),
        message: None,
        sent_at: chrono::Utc::now(),
    }
}

/// The status an operation would move the document to, if any.
fn target_status(op: Op) -> Option<DocumentStatus> {
    match op {
        Op::Issue => Some(DocumentStatus::Issued),
        Op::Send => Some(DocumentStatus::Sent),
        Op::Archive => Some(DocumentStatus::Archived),
        Op::ExportPdf => None,
    }
}

fn apply(service: &PropService, document: &Document, op: Op) -> Result<Document, super::DocumentError> {
    match op {
        Op::Issue => service.issue(document.id),
        Op::Send => service.send(document.id, send_details()),
        Op::Archive => service.archive(document.id),
        Op::ExportPdf => service.record_pdf_export(document.id),
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Every created document in a tenant gets a distinct number, and
    /// numbers within a sequence are strictly increasing.
    #[test]
    fn prop_numbering_unique_and_increasing(
        kinds in prop::collection::vec((arb_document_type(), arb_initial_status()), 1..20),
    ) {
        let (service, tenant) = service();
        let mut seen = HashSet::new();
        let mut last_per_prefix: std::collections::HashMap<String, u64> =
            std::collections::HashMap::new();

        for (document_type, initial_status) in kinds {
            let document = service
                .create(create_input(tenant, document_type, initial_status))
                .unwrap();
            prop_assert!(seen.insert(document.document_number.clone()));

            let (prefix, counter) = document
                .document_number
                .rsplit_once('-')
                .expect("number has prefix-counter shape");
            let counter: u64 = counter.parse().unwrap();
            if let Some(&previous) = last_per_prefix.get(prefix) {
                prop_assert!(counter > previous);
            }
            last_per_prefix.insert(prefix.to_string(), counter);
        }
    }

    /// The event log is append-only: every successful operation leaves the
    /// existing prefix of the log byte-for-byte intact and only ever adds
    /// to the end.
    #[test]
    fn prop_event_log_append_only(
        document_type in arb_document_type(),
        initial_status in arb_initial_status(),
        ops in prop::collection::vec(arb_op(), 0..12),
    ) {
        let (service, tenant) = service();
        let mut document = service
            .create(create_input(tenant, document_type, initial_status))
            .unwrap();

        for op in ops {
            let before = document.events.clone();
            match apply(&service, &document, op) {
                Ok(after) => {
                    prop_assert!(after.events.len() >= before.len());
                    prop_assert_eq!(&after.events[..before.len()], &before[..]);
                    document = after;
                }
                Err(_) => {
                    // A refused operation stores nothing.
                    prop_assert_eq!(&document.events, &before);
                }
            }
        }
    }

    /// A transition method succeeds exactly when the transition graph
    /// allows the move for the document's current status (modulo the
    /// invoice-only and draft-or-issued-only method restrictions).
    #[test]
    fn prop_methods_agree_with_transition_graph(
        document_type in arb_document_type(),
        initial_status in arb_initial_status(),
        ops in prop::collection::vec(arb_op(), 1..12),
    ) {
        let (service, tenant) = service();
        let mut document = service
            .create(create_input(tenant, document_type, initial_status))
            .unwrap();

        for op in ops {
            let from = document.status;
            let result = apply(&service, &document, op);

            match target_status(op) {
                None => {
                    // Exporting is always allowed.
                    prop_assert!(result.is_ok());
                }
                Some(to) => {
                    let method_allows = match op {
                        Op::Issue => document_type == DocumentType::Invoice,
                        // Paid -> Sent is reserved for reconciliation.
                        Op::Send => matches!(
                            from,
                            DocumentStatus::Draft | DocumentStatus::Issued
                        ),
                        _ => true,
                    };
                    let expected = transition::is_allowed(from, to) && method_allows;
                    prop_assert_eq!(result.is_ok(), expected);
                }
            }

            if let Ok(after) = result {
                document = after;
            }
        }
    }
}
