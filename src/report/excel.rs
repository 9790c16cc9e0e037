/// Spreadsheet export for the high-priority patient list.
///
/// One worksheet, a bold header row, one row per patient in the order the
/// caller provides (the segmentation analysis sorts descending by cost
/// before calling in).

use std::path::Path;

use rust_xlsxwriter::{Format, Workbook};

use crate::config::ensure_parent_dir;
use crate::model::{AnalysisError, PatientActivity};

fn export_err<E: std::fmt::Display>(e: E) -> AnalysisError {
    AnalysisError::Export(e.to_string())
}

/// Write `patients` to an xlsx workbook at `path`.
pub fn write_patient_list(patients: &[PatientActivity], path: &Path) -> Result<(), AnalysisError> {
    ensure_parent_dir(path)?;

    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.set_name("High Priority Patients").map_err(export_err)?;

    let header = Format::new().set_bold();
    sheet.write_string_with_format(0, 0, "patient_id", &header).map_err(export_err)?;
    sheet.write_string_with_format(0, 1, "patient_name", &header).map_err(export_err)?;
    sheet.write_string_with_format(0, 2, "total_encounters", &header).map_err(export_err)?;
    sheet.write_string_with_format(0, 3, "total_med_cost", &header).map_err(export_err)?;

    for (i, patient) in patients.iter().enumerate() {
        let row = (i + 1) as u32;
        sheet.write_string(row, 0, &patient.patient_id).map_err(export_err)?;
        sheet.write_string(row, 1, &patient.patient_name).map_err(export_err)?;
        sheet
            .write_number(row, 2, patient.total_encounters as f64)
            .map_err(export_err)?;
        sheet
            .write_number(row, 3, patient.total_med_cost)
            .map_err(export_err)?;
    }

    workbook.save(path).map_err(export_err)?;
    Ok(())
}
