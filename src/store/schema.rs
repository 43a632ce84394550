//! Hospital tables read by the report engine, plus a small demo data set.
//!
//! Money columns are TEXT holding a decimal literal so values survive the
//! round trip without passing through floating point.

pub const SCHEMA_SQL: &str = "
CREATE TABLE IF NOT EXISTS departments (
    id INTEGER PRIMARY KEY,
    name TEXT NOT NULL,
    description TEXT,
    location TEXT,
    head_doctor_id INTEGER,
    status TEXT NOT NULL DEFAULT 'active',
    created_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
);

CREATE TABLE IF NOT EXISTS doctors (
    id INTEGER PRIMARY KEY,
    first_name TEXT NOT NULL,
    last_name TEXT NOT NULL,
    email TEXT,
    phone TEXT,
    specialization TEXT,
    department_id INTEGER REFERENCES departments(id),
    experience_years INTEGER,
    consultation_fee TEXT,
    status TEXT NOT NULL DEFAULT 'active',
    created_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
);

CREATE TABLE IF NOT EXISTS patients (
    id INTEGER PRIMARY KEY,
    first_name TEXT NOT NULL,
    last_name TEXT NOT NULL,
    email TEXT,
    phone TEXT,
    date_of_birth TEXT,
    gender TEXT,
    blood_group TEXT,
    address TEXT,
    status TEXT NOT NULL DEFAULT 'active',
    created_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
);

CREATE TABLE IF NOT EXISTS appointments (
    id INTEGER PRIMARY KEY,
    patient_id INTEGER REFERENCES patients(id),
    doctor_id INTEGER REFERENCES doctors(id),
    appointment_date TEXT NOT NULL,
    appointment_time TEXT,
    reason TEXT,
    status TEXT NOT NULL DEFAULT 'scheduled',
    created_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
);

CREATE TABLE IF NOT EXISTS invoices (
    id INTEGER PRIMARY KEY,
    invoice_number TEXT NOT NULL,
    patient_id INTEGER REFERENCES patients(id),
    appointment_id INTEGER REFERENCES appointments(id),
    invoice_date TEXT NOT NULL,
    due_date TEXT,
    total_amount TEXT NOT NULL DEFAULT '0.00',
    paid_amount TEXT NOT NULL DEFAULT '0.00',
    status TEXT NOT NULL DEFAULT 'pending'
);

CREATE TABLE IF NOT EXISTS staff (
    id INTEGER PRIMARY KEY,
    first_name TEXT NOT NULL,
    last_name TEXT NOT NULL,
    email TEXT,
    phone TEXT,
    role TEXT NOT NULL,
    department_id INTEGER REFERENCES departments(id),
    hire_date TEXT,
    salary TEXT,
    status TEXT NOT NULL DEFAULT 'active'
);

CREATE INDEX IF NOT EXISTS idx_appointments_date ON appointments(appointment_date);
CREATE INDEX IF NOT EXISTS idx_invoices_date ON invoices(invoice_date);
";

pub const SEED_SQL: &str = "
INSERT OR IGNORE INTO departments (id, name, description, location, head_doctor_id, status, created_at) VALUES
    (1, 'Cardiology', 'Heart and vascular care', 'Building A, Floor 2', 1, 'active', '2023-01-10 08:00:00'),
    (2, 'Pediatrics', 'Care for infants, children and adolescents', 'Building B, Floor 1', 3, 'active', '2023-01-10 08:00:00'),
    (3, 'Radiology', 'Imaging & diagnostics', 'Building A, Basement', NULL, 'active', '2023-02-01 08:00:00'),
    (4, 'Dermatology', NULL, NULL, NULL, 'inactive', '2023-03-15 08:00:00');

INSERT OR IGNORE INTO doctors (id, first_name, last_name, email, phone, specialization, department_id, experience_years, consultation_fee, status, created_at) VALUES
    (1, 'Amelia', 'Hart', 'a.hart@hospital.example', '555-0101', 'Cardiologist', 1, 15, '150.00', 'active', '2023-01-12 09:00:00'),
    (2, 'Rahul', 'Mehta', 'r.mehta@hospital.example', '555-0102', 'Interventional Cardiologist', 1, 8, '175.50', 'active', '2023-02-03 09:00:00'),
    (3, 'Grace', 'Okafor', 'g.okafor@hospital.example', NULL, 'Pediatrician', 2, 11, '120.00', 'active', '2023-01-20 09:00:00'),
    (4, 'Lucas', 'Bernard', NULL, '555-0104', 'Radiologist', 3, 4, '95.25', 'on_leave', '2023-06-01 09:00:00');

INSERT OR IGNORE INTO patients (id, first_name, last_name, email, phone, date_of_birth, gender, blood_group, address, status, created_at) VALUES
    (1, 'John', 'Doe', 'john.doe@mail.example', '555-1001', '1980-04-12', 'male', 'O+', '12 Elm Street', 'active', '2024-01-02 10:15:00'),
    (2, 'Maria', 'Garcia', 'maria.g@mail.example', '555-1002', '1992-09-30', 'female', 'A-', '88 Oak Avenue, Apt 4', 'active', '2024-01-05 14:20:00'),
    (3, 'Robert', 'Smith, \"Bob\"', NULL, '555-1003', '1975-12-01', 'male', NULL, '7 Pine Road\nRear entrance', 'active', '2024-01-09 09:05:00'),
    (4, 'Yuki', 'Tanaka', 'yuki.t@mail.example', NULL, '2015-06-18', 'female', 'B+', NULL, 'inactive', '2024-02-11 16:45:00');

INSERT OR IGNORE INTO appointments (id, patient_id, doctor_id, appointment_date, appointment_time, reason, status, created_at) VALUES
    (1, 1, 1, '2024-01-05', '09:00:00', 'Chest pain follow-up', 'completed', '2024-01-02 10:20:00'),
    (2, 2, 3, '2024-01-12', '10:30:00', 'Annual check-up', 'completed', '2024-01-05 14:25:00'),
    (3, 3, 2, '2024-01-20', '14:00:00', 'ECG review, 100% urgent', 'cancelled', '2024-01-09 09:10:00'),
    (4, 1, 2, '2024-01-31', '16:15:00', 'Stent consultation', 'completed', '2024-01-20 11:00:00'),
    (5, 4, 3, '2024-02-02', '08:45:00', 'Vaccination', 'scheduled', '2024-01-25 13:30:00'),
    (6, 2, 4, '2024-02-14', NULL, NULL, 'scheduled', '2024-02-01 12:00:00');

INSERT OR IGNORE INTO invoices (id, invoice_number, patient_id, appointment_id, invoice_date, due_date, total_amount, paid_amount, status) VALUES
    (1, 'INV-2024-0001', 1, 1, '2024-01-05', '2024-02-04', '150.00', '150.00', 'paid'),
    (2, 'INV-2024-0002', 2, 2, '2024-01-12', '2024-02-11', '120.00', '60.00', 'partial'),
    (3, 'INV-2024-0003', 1, 4, '2024-01-31', '2024-03-01', '175.50', '0.00', 'pending'),
    (4, 'INV-2024-0004', 3, NULL, '2023-11-20', '2023-12-20', '80.10', '0.00', 'overdue');

INSERT OR IGNORE INTO staff (id, first_name, last_name, email, phone, role, department_id, hire_date, salary, status) VALUES
    (1, 'Nora', 'Quinn', 'n.quinn@hospital.example', '555-2001', 'nurse', 1, '2021-03-01', '52000.00', 'active'),
    (2, 'Omar', 'Haddad', 'o.haddad@hospital.example', NULL, 'receptionist', NULL, '2022-07-15', '38500.00', 'active'),
    (3, 'Ivy', 'Chen', NULL, '555-2003', 'lab technician', 3, '2020-11-09', '46250.50', 'inactive');
";
