//! Sample data for the demo portal.

use coverforge::prelude::*;

pub fn customers() -> CustomerBook {
    let records = [
        (1, "John Smith", "john.smith@email.com", "(555) 123-4567",
         "123 Main St, Springfield, IL 62701", 2, 2450, "2024-05-28",
         CustomerStatus::Active),
        (2, "Sarah Johnson", "sarah.j@email.com", "(555) 234-5678",
         "456 Oak Ave, Chicago, IL 60601", 1, 980, "2024-05-25",
         CustomerStatus::Active),
        (3, "Mike Chen", "mike.chen@email.com", "(555) 345-6789",
         "789 Pine Rd, Naperville, IL 60540", 3, 3200, "2024-05-20",
         CustomerStatus::Pending),
        (4, "Lisa Wilson", "lisa.wilson@email.com", "(555) 456-7890",
         "321 Elm St, Peoria, IL 61601", 1, 750, "2024-05-15",
         CustomerStatus::Inactive),
        (5, "David Brown", "david.b@email.com", "(555) 567-8901",
         "654 Maple Dr, Rockford, IL 61101", 2, 1850, "2024-05-22",
         CustomerStatus::Active),
        (6, "Emily Davis", "emily.davis@email.com", "(555) 678-9012",
         "987 Cedar Ln, Aurora, IL 60502", 1, 1120, "2024-05-18",
         CustomerStatus::Active),
    ];

    let mut book = CustomerBook::new();
    for (id, name, email, phone, address, policies, premium, contact, status)
        in records
    {
        book.insert(Customer {
            id: CustomerId(id),
            name: name.into(),
            email: email.into(),
            phone: phone.into(),
            address: address.into(),
            policies,
            total_premium: premium,
            last_contact: contact.into(),
            status,
        });
    }
    book
}

pub fn renewals() -> RenewalLedger {
    let records = [
        (1, "Amit Kumar", "AUTO-2024-001", 95_000, 17,
         Priority::High, RenewalStatus::Pending),
        (2, "Priya Sharma", "AUTO-2024-002", 78_000, 20,
         Priority::Medium, RenewalStatus::Contacted),
        (3, "Rohit Singh", "AUTO-2024-003", 125_000, 24,
         Priority::High, RenewalStatus::Pending),
        (4, "Sunita Patel", "AUTO-2024-004", 65_000, 27,
         Priority::Low, RenewalStatus::Renewed),
        (5, "Vikram Gupta", "AUTO-2024-005", 110_000, 34,
         Priority::High, RenewalStatus::Pending),
        (6, "Anjali Mehta", "AUTO-2024-006", 72_000, 40,
         Priority::Medium, RenewalStatus::Declined),
    ];

    let mut ledger = RenewalLedger::new();
    for (id, customer, policy, premium, days_left, priority, status) in records
    {
        ledger.insert(Renewal {
            id: RenewalId(id),
            customer: customer.into(),
            policy: policy.into(),
            premium,
            days_left,
            priority,
            status,
        });
    }
    ledger
}

pub fn activity() -> ActivityFeed {
    let mut feed = ActivityFeed::new();
    let entries: [(ActivityKind, &str); 4] = [
        (ActivityKind::Policy, "Policy updated for Ravi Kumar"),
        (ActivityKind::Customer, "New customer Anjali Mehta added"),
        (ActivityKind::Renewal, "Renewal reminder sent to Priya Sharma"),
        (ActivityKind::Scan, "New policy document scanned for Vikram Gupta"),
    ];
    for (kind, description) in entries {
        feed.record(kind, description);
    }
    feed
}
