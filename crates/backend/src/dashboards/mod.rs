pub mod d400_license_alerts;
