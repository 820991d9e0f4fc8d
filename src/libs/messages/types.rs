#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    // === SERVICE MESSAGES ===
    Greeting,
    ServerStarting(String), // bind address
    ServerListening(String), // local address
    ServerStopping,
    ServerStopped,
    ServerFailed(String), // error
    ServiceVersion { name: String, version: String },

    // === SIGNAL MESSAGES ===
    ReceivedSigterm,
    ReceivedSigint,
    ReceivedCtrlC,
    CtrlCListenFailed(String), // error
    FailedToCreateSigtermHandler,
    FailedToCreateSigintHandler,

    // === STORE MESSAGES ===
    StoreOpened { path: String, count: usize },
    StoreCreatedEmpty(String), // path
    TodoAdded(i64),
    TodoUpdated(i64),
    TodosDeleted(usize),
    IdsExhausted,

    // === VALIDATION MESSAGES ===
    ContentEmpty,
    IdMissing,
    IllegalStatus,

    // === ROUTING MESSAGES ===
    RouteNotFound,
    RequestFailed { method: String, path: String, error: String },

    // === CONFIGURATION MESSAGES ===
    ConfigSaved,
    ConfigDeleted,
    ConfigModuleServer,
    InvalidPortEnv(String), // raw value
    PromptServerPort,
    PromptStoreFile,
}
