//! Synology web API error codes.

/// Common and FileStation error codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiErrorCode {
    /// Unknown error
    Unknown = 100,
    /// No parameter of API, method or version
    NoParameter = 101,
    /// The requested API does not exist
    NoSuchApi = 102,
    /// The requested method does not exist
    NoSuchMethod = 103,
    /// The requested version does not support the functionality
    VersionNotSupported = 104,
    /// The logged in session does not have permission
    Permission = 105,
    /// Session timeout
    SessionTimeout = 106,
    /// Session interrupted by duplicate login
    SessionInterrupted = 107,
    /// SID not found
    SidNotFound = 119,
    /// Invalid parameter of file operation
    InvalidParameter = 400,
    /// Unknown error of file operation
    FileOperation = 401,
    /// System is too busy
    Busy = 402,
    /// Invalid user does this file operation
    InvalidUser = 403,
    /// Invalid group does this file operation
    InvalidGroup = 404,
    /// Invalid user and group does this file operation
    InvalidUserAndGroup = 405,
    /// Can't get user/group information from the account server
    AccountServer = 406,
    /// Operation not permitted
    NotPermitted = 407,
    /// No such file or directory
    NoSuchFile = 408,
    /// Non-supported file system
    UnsupportedFileSystem = 409,
    /// Failed to connect internet-based file system
    RemoteFileSystem = 410,
    /// Read-only file system
    ReadOnly = 411,
    /// Filename too long in the non-encrypted file system
    NameTooLong = 412,
    /// Filename too long in the encrypted file system
    EncryptedNameTooLong = 413,
    /// File already exists
    AlreadyExists = 414,
    /// Disk quota exceeded
    QuotaExceeded = 415,
    /// No space left on device
    NoSpace = 416,
    /// Input/output error
    Io = 417,
    /// Illegal name or path
    IllegalPath = 418,
    /// Illegal file name
    IllegalName = 419,
    /// Illegal file name on FAT file system
    IllegalFatName = 420,
    /// Device or resource busy
    ResourceBusy = 421,
    /// No such task of the file operation
    NoSuchTask = 599,
    /// Anything not listed above
    Other = -1,
}

impl From<i64> for ApiErrorCode {
    fn from(code: i64) -> Self {
        match code {
            100 => ApiErrorCode::Unknown,
            101 => ApiErrorCode::NoParameter,
            102 => ApiErrorCode::NoSuchApi,
            103 => ApiErrorCode::NoSuchMethod,
            104 => ApiErrorCode::VersionNotSupported,
            105 => ApiErrorCode::Permission,
            106 => ApiErrorCode::SessionTimeout,
            107 => ApiErrorCode::SessionInterrupted,
            119 => ApiErrorCode::SidNotFound,
            400 => ApiErrorCode::InvalidParameter,
            401 => ApiErrorCode::FileOperation,
            402 => ApiErrorCode::Busy,
            403 => ApiErrorCode::InvalidUser,
            404 => ApiErrorCode::InvalidGroup,
            405 => ApiErrorCode::InvalidUserAndGroup,
            406 => ApiErrorCode::AccountServer,
            407 => ApiErrorCode::NotPermitted,
            408 => ApiErrorCode::NoSuchFile,
            409 => ApiErrorCode::UnsupportedFileSystem,
            410 => ApiErrorCode::RemoteFileSystem,
            411 => ApiErrorCode::ReadOnly,
            412 => ApiErrorCode::NameTooLong,
            413 => ApiErrorCode::EncryptedNameTooLong,
            414 => ApiErrorCode::AlreadyExists,
            415 => ApiErrorCode::QuotaExceeded,
            416 => ApiErrorCode::NoSpace,
            417 => ApiErrorCode::Io,
            418 => ApiErrorCode::IllegalPath,
            419 => ApiErrorCode::IllegalName,
            420 => ApiErrorCode::IllegalFatName,
            421 => ApiErrorCode::ResourceBusy,
            599 => ApiErrorCode::NoSuchTask,
            _ => ApiErrorCode::Other,
        }
    }
}

impl ApiErrorCode {
    /// Get human-readable description of the error.
    pub fn description(&self) -> &'static str {
        match self {
            ApiErrorCode::Unknown => "Unknown error",
            ApiErrorCode::NoParameter => "No parameter of API, method or version",
            ApiErrorCode::NoSuchApi => "The requested API does not exist",
            ApiErrorCode::NoSuchMethod => "The requested method does not exist",
            ApiErrorCode::VersionNotSupported => {
                "The requested version does not support the functionality"
            }
            ApiErrorCode::Permission => "The logged in session does not have permission",
            ApiErrorCode::SessionTimeout => "Session timeout",
            ApiErrorCode::SessionInterrupted => "Session interrupted by duplicate login",
            ApiErrorCode::SidNotFound => "SID not found",
            ApiErrorCode::InvalidParameter => "Invalid parameter of file operation",
            ApiErrorCode::FileOperation => "Unknown error of file operation",
            ApiErrorCode::Busy => "System is too busy",
            ApiErrorCode::InvalidUser => "Invalid user does this file operation",
            ApiErrorCode::InvalidGroup => "Invalid group does this file operation",
            ApiErrorCode::InvalidUserAndGroup => "Invalid user and group does this file operation",
            ApiErrorCode::AccountServer => {
                "Can't get user/group information from the account server"
            }
            ApiErrorCode::NotPermitted => "Operation not permitted",
            ApiErrorCode::NoSuchFile => "No such file or directory",
            ApiErrorCode::UnsupportedFileSystem => "Non-supported file system",
            ApiErrorCode::RemoteFileSystem => "Failed to connect internet-based file system",
            ApiErrorCode::ReadOnly => "Read-only file system",
            ApiErrorCode::NameTooLong => "Filename too long in the non-encrypted file system",
            ApiErrorCode::EncryptedNameTooLong => "Filename too long in the encrypted file system",
            ApiErrorCode::AlreadyExists => "File already exists",
            ApiErrorCode::QuotaExceeded => "Disk quota exceeded",
            ApiErrorCode::NoSpace => "No space left on device",
            ApiErrorCode::Io => "Input/output error",
            ApiErrorCode::IllegalPath => "Illegal name or path",
            ApiErrorCode::IllegalName => "Illegal file name",
            ApiErrorCode::IllegalFatName => "Illegal file name on FAT file system",
            ApiErrorCode::ResourceBusy => "Device or resource busy",
            ApiErrorCode::NoSuchTask => "No such task of the file operation",
            ApiErrorCode::Other => "Unrecognised error code",
        }
    }

    /// True for codes meaning the sid is no longer usable.
    pub fn is_session_error(&self) -> bool {
        matches!(
            self,
            ApiErrorCode::SessionTimeout
                | ApiErrorCode::SessionInterrupted
                | ApiErrorCode::SidNotFound
        )
    }
}

/// Descriptions for `SYNO.API.Auth`, whose 400-range codes differ from FileStation's.
pub fn auth_error_description(code: i64) -> &'static str {
    match code {
        400 => "No such account or incorrect password",
        401 => "Account disabled",
        402 => "Permission denied",
        403 => "2-step verification code required",
        404 => "Failed to authenticate 2-step verification code",
        other => ApiErrorCode::from(other).description(),
    }
}
