//! MCP server for webtop automation
//!
//! Exposes the webtop bridge as MCP tools over stdio: browser navigation and
//! page screenshots on one side, OS-level mouse/keyboard injection and
//! desktop capture on the other. Tool coordinates are webtop-relative and
//! are translated through the live browser window rectangle.

mod requests;
mod tools;

use anyhow::Result;
use clap::Parser;
use rmcp::{
    ErrorData as McpError, ServerHandler, ServiceExt,
    handler::server::tool::ToolRouter,
    handler::server::wrapper::Parameters,
    model::{
        CallToolResult, Content, Implementation, ProtocolVersion, ServerCapabilities, ServerInfo,
    },
    tool, tool_handler, tool_router,
    transport::stdio,
};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use webtop_automation::SessionManager;
use webtop_protocol::DEFAULT_WEBTOP_URL;

use requests::{
    CaptureScreenRequest, ClickRequest, DragRequest, InitializeWebtopRequest, KeyTapRequest,
    MoveMouseRequest, NavigateRequest, ScreenshotRequest, ScrollRequest, TypeTextRequest,
};

#[derive(Debug, Parser)]
#[command(name = "webtop-mcp-server", about = "MCP server for webtop automation")]
struct Args {
    /// Webtop URL opened at startup and by initialize_webtop
    #[arg(long, env = "WEBTOP_URL", default_value = DEFAULT_WEBTOP_URL)]
    webtop_url: String,

    /// Do not launch the browser at startup
    #[arg(long)]
    no_auto_init: bool,
}

/// webtop-mcp server handler
#[derive(Clone)]
struct WebtopMcpServer {
    session: SessionManager,
    webtop_url: String,
    tool_router: ToolRouter<Self>,
}

impl WebtopMcpServer {
    fn new(webtop_url: String) -> Self {
        Self {
            session: SessionManager::new(),
            webtop_url,
            tool_router: Self::tool_router(),
        }
    }
}

#[tool_router]
impl WebtopMcpServer {
    /// Ping the server to check if it's running
    #[tool(description = "Ping the webtop-mcp server to verify it's running")]
    async fn ping(&self) -> String {
        "pong".to_string()
    }

    #[tool(description = "Launch the browser and open the webtop page (idempotent)")]
    async fn initialize_webtop(
        &self,
        Parameters(req): Parameters<InitializeWebtopRequest>,
    ) -> String {
        let url = req.url.unwrap_or_else(|| self.webtop_url.clone());
        tools::webtop::initialize(&self.session, &url).await
    }

    #[tool(description = "Close the webtop browser")]
    async fn shutdown_webtop(&self) -> String {
        tools::webtop::shutdown(&self.session).await
    }

    #[tool(description = "Navigate the webtop browser to a URL")]
    async fn navigate(&self, Parameters(req): Parameters<NavigateRequest>) -> String {
        tools::webtop::navigate(&self.session, &req.url).await
    }

    #[tool(description = "Get the title of the current webtop page")]
    async fn get_title(&self) -> String {
        tools::webtop::get_title(&self.session).await
    }

    #[tool(
        description = "Take a screenshot of the webtop page. Returns base64 image content, or saves to 'path' when given"
    )]
    async fn screenshot(
        &self,
        Parameters(req): Parameters<ScreenshotRequest>,
    ) -> Result<CallToolResult, McpError> {
        match tools::webtop::screenshot(&self.session, req.path.as_deref()).await {
            Ok(content) => Ok(CallToolResult::success(vec![content])),
            Err(message) => Ok(CallToolResult::error(vec![Content::text(message)])),
        }
    }

    #[tool(description = "Move the mouse cursor to webtop-relative coordinates")]
    async fn move_mouse(&self, Parameters(req): Parameters<MoveMouseRequest>) -> String {
        tools::mouse::move_mouse(&self.session, req.x, req.y).await
    }

    #[tool(
        description = "Click the mouse at the current position, optionally moving to webtop-relative coordinates first"
    )]
    async fn click(&self, Parameters(req): Parameters<ClickRequest>) -> String {
        tools::mouse::click(
            &self.session,
            req.button.as_deref(),
            req.double.unwrap_or(false),
            req.x,
            req.y,
        )
        .await
    }

    #[tool(description = "Type a string of text into the webtop")]
    async fn type_text(&self, Parameters(req): Parameters<TypeTextRequest>) -> String {
        tools::keyboard::type_text(&self.session, &req.text).await
    }

    #[tool(description = "Tap a key in the webtop, optionally with modifier keys held")]
    async fn key_tap(&self, Parameters(req): Parameters<KeyTapRequest>) -> String {
        tools::keyboard::key_tap(&self.session, &req.key, req.modifiers.unwrap_or_default()).await
    }

    #[tool(description = "Scroll the mouse wheel by signed pixel deltas")]
    async fn scroll(&self, Parameters(req): Parameters<ScrollRequest>) -> String {
        tools::mouse::scroll(
            &self.session,
            req.delta_x.unwrap_or(0),
            req.delta_y.unwrap_or(0),
        )
        .await
    }

    #[tool(description = "Drag the mouse from its current position to webtop-relative coordinates")]
    async fn drag(&self, Parameters(req): Parameters<DragRequest>) -> String {
        tools::mouse::drag(&self.session, req.x, req.y, req.button.as_deref()).await
    }

    #[tool(description = "Get the size of the physical screen")]
    async fn get_screen_size(&self) -> String {
        tools::screen::get_screen_size().await
    }

    #[tool(description = "Get the current mouse cursor position in screen coordinates")]
    async fn get_mouse_position(&self) -> String {
        tools::mouse::get_mouse_position().await
    }

    #[tool(
        description = "Capture the webtop viewport from the desktop, or a webtop-relative region of it. Returns base64 image content, or saves to 'path' when given"
    )]
    async fn capture_screen(
        &self,
        Parameters(req): Parameters<CaptureScreenRequest>,
    ) -> Result<CallToolResult, McpError> {
        let region = match (req.x, req.y, req.width, req.height) {
            (Some(x), Some(y), Some(w), Some(h)) => Some((x, y, w, h)),
            (None, None, None, None) => None,
            _ => {
                return Ok(CallToolResult::error(vec![Content::text(
                    tools::error_response(
                        "invalid_region",
                        "x, y, width and height must be provided together",
                    ),
                )]));
            }
        };

        match tools::screen::capture_screen(&self.session, region, req.path.as_deref()).await {
            Ok(content) => Ok(CallToolResult::success(vec![content])),
            Err(message) => Ok(CallToolResult::error(vec![Content::text(message)])),
        }
    }
}

#[tool_handler]
impl ServerHandler for WebtopMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation::from_build_env(),
            instructions: Some(
                "webtop-mcp server controls a webtop (browser-delivered virtual desktop). \
                 Use 'initialize_webtop' to launch the browser, then drive it with the mouse, \
                 keyboard and screen tools. Mouse and capture coordinates are relative to the \
                 webtop viewport, not the physical screen."
                    .into(),
            ),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging to stderr (stdout is used for MCP communication)
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .init();

    let args = Args::parse();
    tracing::info!("Starting webtop-mcp server...");

    let server = WebtopMcpServer::new(args.webtop_url.clone());

    // Launch the webtop at startup; tools report "not initialized" until a
    // later initialize_webtop succeeds.
    if !args.no_auto_init {
        if let Err(e) = server.session.initialize(&args.webtop_url).await {
            tracing::warn!("Failed to initialize webtop at startup: {}", e);
        }
    }

    let service = server.serve(stdio()).await?;

    tracing::info!("Server started, waiting for requests...");
    service.waiting().await?;

    Ok(())
}
